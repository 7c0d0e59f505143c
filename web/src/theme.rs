use chrono::prelude::*;

/// Fixed list of backdrop images the solved tiles gradually reveal.
pub(crate) const BACKDROPS: [&str; 6] = [
    "bbear.png",
    "bcat.png",
    "bdog.png",
    "bpanda.png",
    "bpinguin.png",
    "bpolar.png",
];

/// Backdrop for a 1-based day of month, cycling through the list.
pub(crate) fn daily_backdrop(day_of_month: u32) -> &'static str {
    let index = day_of_month.saturating_sub(1) as usize % BACKDROPS.len();
    BACKDROPS[index]
}

pub(crate) fn todays_backdrop() -> &'static str {
    daily_backdrop(Local::now().day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_cycles_with_period_six_from_day_one() {
        assert_eq!(daily_backdrop(1), "bbear.png");
        assert_eq!(daily_backdrop(2), "bcat.png");
        assert_eq!(daily_backdrop(6), "bpolar.png");
        assert_eq!(daily_backdrop(7), "bbear.png");
        assert_eq!(daily_backdrop(31), daily_backdrop(31 - 6));
    }
}
