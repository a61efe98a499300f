use rand::seq::SliceRandom;

pub const USER_COLORS: [&str; 10] = [
    "#FF5733", "#33FF57", "#3357FF", "#FF33F5", "#F5FF33", "#33FFF5", "#FF3333", "#33FF33",
    "#3333FF", "#FF33FF",
];

/// Colors are not unique per user; two users may end up with the same one.
pub fn random_color() -> &'static str {
    USER_COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_COLORS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_picks_from_palette() {
        for _ in 0..32 {
            assert!(USER_COLORS.contains(&random_color()));
        }
    }
}
