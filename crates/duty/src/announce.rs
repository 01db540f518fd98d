//! Announcement message builders.
//!
//! Formatting only; dispatch cadence and delivery live elsewhere. Message
//! text stays in Chinese to match the group chat it lands in.

/// Mid-morning announcement: the day's issue-triage assignee.
pub fn bug_assignment_message(date: &str, person: &str) -> String {
    format!("【今日禅道指派】\n日期：{}\n指派人员：{}", date, person)
}

/// End-of-day combined announcement: duty person plus triage assignee.
/// `None` when neither rotation produced a name (nothing worth sending).
pub fn combined_message(date: &str, duty: Option<&str>, bug: Option<&str>) -> Option<String> {
    let mut parts = vec![format!("【OnCall】\n日期：{}", date)];
    if let Some(person) = duty {
        parts.push(format!("值班人：{}", person));
    }
    if let Some(person) = bug {
        parts.push(format!("禅道指派：{}", person));
    }
    if parts.len() == 1 {
        return None;
    }
    Some(parts.join("\n"))
}

/// Notice sent when the rotation table was regenerated.
pub fn table_refreshed_message(date: &str, download_url: &str) -> String {
    format!(
        "📋 值班计划表已更新\n更新日期：{}\n下载地址：{}",
        date, download_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bug_assignment_message_contains_date_and_person() {
        let msg = bug_assignment_message("2025-01-01", "alice");
        assert!(msg.contains("2025-01-01"));
        assert!(msg.contains("alice"));
    }

    #[test]
    fn combined_message_with_both() {
        let msg = combined_message("2025-01-01", Some("alice"), Some("bob")).unwrap();
        assert!(msg.contains("值班人：alice"));
        assert!(msg.contains("禅道指派：bob"));
    }

    #[test]
    fn combined_message_with_duty_only() {
        let msg = combined_message("2025-01-01", Some("alice"), None).unwrap();
        assert!(msg.contains("alice"));
        assert!(!msg.contains("禅道指派"));
    }

    #[test]
    fn combined_message_with_nothing_is_none() {
        assert_eq!(combined_message("2025-01-01", None, None), None);
    }

    #[test]
    fn refresh_notice_carries_download_link() {
        let msg = table_refreshed_message("2025-06-01", "http://host/api/download_duty_schedule");
        assert!(msg.contains("http://host/api/download_duty_schedule"));
        assert!(msg.contains("2025-06-01"));
    }
}
