use colored::Colorize;

use crate::presence::ChatSummary;
use crate::report::{preset_label, Bucket, Report};

fn bucket_icon(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Online => "🟢",
        Bucket::Offline => "⚪",
        Bucket::Bots => "🤖",
        Bucket::Deleted => "❌",
    }
}

/// Format a check report with icons and colors
pub fn format_report_pretty(report: &Report) -> String {
    let c = &report.counts;
    let mut output = format!("📊 {}\n", "Check Report".bold());
    output.push_str(&format!(
        "🕒 Threshold: {}\n\n",
        report.threshold_label.bold()
    ));

    output.push_str(&format!("👥 Total tracked: {}\n", c.total));
    for (bucket, count) in [
        (Bucket::Online, c.online.to_string().green()),
        (Bucket::Offline, c.offline.to_string().normal()),
        (Bucket::Bots, c.bots.to_string().cyan()),
        (Bucket::Deleted, c.deleted.to_string().red()),
    ] {
        output.push_str(&format!("{} {}: {count}\n", bucket_icon(bucket), bucket.title()));
    }

    for section in &report.sections {
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            bucket_icon(section.bucket),
            format!("{}:", section.title).bold()
        ));
        for entry in &section.entries {
            output.push_str(&format!("  {entry}\n"));
        }
    }

    output
}

/// Format the threshold chooser shown when no threshold was given
pub fn format_threshold_menu_pretty(chat_id: i64, presets: &[i64]) -> String {
    let mut output = format!("🕹 {}\n", "Select Time Filter".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for minutes in presets {
        let icon = if *minutes >= 1440 { "🟡" } else { "🟢" };
        output.push_str(&format!(
            "{icon} {:<10} {}\n",
            preset_label(*minutes),
            format!("rollcall check {chat_id} {minutes}").dimmed()
        ));
    }

    output
}

/// Format tracked chats as a list
pub fn format_chats_pretty(chats: &[ChatSummary]) -> String {
    if chats.is_empty() {
        return "Chats (0)\n  No chats tracked yet".to_string();
    }

    let mut output = format!("Chats ({})\n", chats.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for chat in chats {
        output.push_str(&format!(
            "{}  {} members\n",
            chat.chat_id.to_string().bold(),
            chat.members
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::sample_record;
    use crate::report::{classify, render};

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_format_report_pretty_counts_and_sections() {
        let mut ada = sample_record(1, Some(NOW));
        ada.username = "ada".into();
        let mut bot = sample_record(2, Some(NOW));
        bot.is_bot = true;

        let report = render(2880, classify(&[ada, bot], 2880, NOW));
        let output = format_report_pretty(&report);

        assert!(output.contains("Check Report"));
        assert!(output.contains("2 Day(s)"));
        assert!(output.contains("Total tracked: 2"));
        assert!(output.contains("ada (1)"));
        assert!(output.contains("2 (2)"));
        assert!(output.contains("🤖"));
    }

    #[test]
    fn test_format_report_pretty_skips_empty_sections() {
        let report = render(30, classify(&[sample_record(1, None)], 30, NOW));
        let output = format_report_pretty(&report);

        assert!(output.contains("Total tracked: 1"));
        assert!(!output.contains("  1 (1)"));
    }

    #[test]
    fn test_format_threshold_menu() {
        let output = format_threshold_menu_pretty(-100, &[30, 1440]);

        assert!(output.contains("Select Time Filter"));
        assert!(output.contains("30 Min"));
        assert!(output.contains("1 Day"));
        assert!(output.contains("rollcall check -100 1440"));
    }

    #[test]
    fn test_format_chats_pretty() {
        assert!(format_chats_pretty(&[]).contains("No chats tracked yet"));

        let output = format_chats_pretty(&[ChatSummary { chat_id: -100, members: 3 }]);
        assert!(output.contains("Chats (1)"));
        assert!(output.contains("-100"));
        assert!(output.contains("3 members"));
    }
}
