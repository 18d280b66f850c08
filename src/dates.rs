use jiff::Span;
use jiff::civil::Date;

pub const DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
pub const NUM_DAYS: usize = DAYS.len();

/// Display labels ("12 May") for the five consecutive calendar days starting
/// at `week_start`. The labels only read Mon-Fri when `week_start` is a
/// Monday; that is a convention of the data, not something enforced here.
pub fn weekday_labels(week_start: Date) -> Vec<String> {
    (0..NUM_DAYS as i64)
        .map(|i| {
            week_start
                .saturating_add(Span::new().days(i))
                .strftime("%d %b")
                .to_string()
        })
        .collect()
}

/// Display caption with the zero-padded ISO week number. Not an identity key.
pub fn week_label(week_start: Date) -> String {
    format!("Week {:02}", week_start.iso_week_date().week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_weekday_labels_for_monday_week() {
        let labels = weekday_labels(date(2025, 5, 12));
        assert_eq!(labels, ["12 May", "13 May", "14 May", "15 May", "16 May"]);
    }

    #[test]
    fn test_weekday_labels_are_consecutive_days() {
        let start = date(2025, 12, 29);
        let labels = weekday_labels(start);
        assert_eq!(labels.len(), NUM_DAYS);
        for (i, label) in labels.iter().enumerate() {
            let day = start.saturating_add(Span::new().days(i as i64));
            assert_eq!(*label, day.strftime("%d %b").to_string());
        }
        // rolls over the year boundary rather than skipping days
        assert_eq!(labels[3], "01 Jan");
    }

    #[test]
    fn test_week_label_zero_padded() {
        assert_eq!(week_label(date(2025, 1, 6)), "Week 02");
        assert_eq!(week_label(date(2025, 5, 12)), "Week 20");
    }
}
