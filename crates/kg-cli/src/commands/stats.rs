use std::path::Path;

pub fn run(state: &Path, reset: bool) -> Result<(), String> {
    let mut settings = super::open_settings(state)?;

    if reset {
        settings.reset_stats().map_err(|e| e.to_string())?;
        println!("  Statistics reset.");
    }

    let played = settings.total_games();
    let won = settings.games_won();
    println!("  Games played: {played}");
    println!("  Games won:    {won}");
    match win_rate(played, won) {
        Some(rate) => println!("  Win rate:     {rate:.0}%"),
        None => println!("  Win rate:     -"),
    }

    Ok(())
}

// Rounds are only counted once the next one starts, so wins can run ahead.
fn win_rate(played: u32, won: u32) -> Option<f64> {
    (played > 0).then(|| (f64::from(won) * 100.0 / f64::from(played)).min(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_needs_games() {
        assert_eq!(win_rate(0, 0), None);
        assert_eq!(win_rate(4, 1), Some(25.0));
        assert_eq!(win_rate(1, 2), Some(100.0));
    }
}
