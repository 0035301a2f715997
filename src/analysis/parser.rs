//! Free-text journal parser.
//!
//! Input is one blob that may hold many concatenated "Discord-style"
//! entries. Everything here degrades instead of failing: an extraction
//! that finds nothing leaves the field unset, and the raw block is
//! preserved verbatim no matter how little structure was recovered.

use std::sync::LazyLock;

use chrono::NaiveDate;
use itertools::Itertools;
use regex_lite::{Captures, Regex};

use crate::domain::{ParsedEntry, SetupDetails};
use crate::utils::{TimeUtils, local_today};

/// Blocks shorter than this are treated as boilerplate, not entries.
const MIN_BLOCK_LEN: usize = 50;

/// Lesson fragments shorter than this are list-marker noise.
const MIN_LESSON_LEN: usize = 10;

/// A candidate block must mention at least one of these to survive.
const ENTRY_KEYWORDS: &[&str] = &["conviction", "setup", "entry", "exit", "lesson", "execution"];

/// Longer names first so the alternation never stops at a prefix
/// ("september" before "sept" before "sep").
const MONTHS: &str = "january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept|sep|october|oct|november|nov|december|dec";

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)trading\s+journal\s*[\-–—:]*\s*({MONTHS})\s+(\d{{1,2}})[,\s]+(\d{{4}})"
    ))
    .expect("valid heading pattern")
});

static MONTH_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({MONTHS})\s+(\d{{1,2}})[,\s]+(\d{{4}})"))
        .expect("valid month date pattern")
});

static NUMERIC_MDY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("valid mdy pattern"));

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("valid iso pattern"));

static CONVICTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:overall\s+)?conviction\s*:\s*(.+)$").expect("valid pattern")
});

static ENTRY_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*entry\s*:\s*(.+)$").expect("valid pattern"));

static SIZE_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:position\s+size|size)\s*:\s*(.+)$").expect("valid pattern")
});

static RISK_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*risk\s*:\s*(.+)$").expect("valid pattern"));

static EXIT_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*exit\s*:\s*(.+)$").expect("valid pattern"));

static MORNING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*morning(?:\s+session)?\s*:(.*)$").expect("valid pattern")
});

static AFTERNOON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*afternoon(?:\s+session)?\s*:(.*)$").expect("valid pattern")
});

static NIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*night(?:\s+session)?\s*:(.*)$").expect("valid pattern")
});

static TRADE_MGMT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*trade\s+management\s*:(.*)$").expect("valid pattern")
});

static MISSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*missed\s+opportunit(?:y|ies)\s*:(.*)$").expect("valid pattern")
});

static FINAL_THOUGHTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*final\s+thoughts\s*:(.*)$").expect("valid pattern")
});

static LESSONS_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*lessons?\s+learned\s*:?(.*)$").expect("valid pattern")
});

static LESSON_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:\d+\s*[.)]|[-*•])\s*").expect("valid pattern")
});

static STANDALONE_LESSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\blesson\s*\d+\s*:\s*([^\r\n]+)").expect("valid pattern")
});

/// Labels that start a new section when they lead a line and are followed
/// by a colon. Multi-line captures stop at the first of these.
const SECTION_LABELS: &[&str] = &[
    "overall conviction",
    "conviction",
    "setup",
    "entry",
    "position size",
    "size",
    "risk",
    "exit",
    "morning session",
    "morning",
    "afternoon session",
    "afternoon",
    "night session",
    "night",
    "trade management",
    "missed opportunities",
    "missed opportunity",
    "lessons learned",
    "final thoughts",
    "execution notes",
    "execution",
];

/// Parse a raw blob into zero or more entries, dating undateable blocks
/// to the current processing date.
pub fn parse_journal(blob: &str) -> Vec<ParsedEntry> {
    parse_journal_as_of(blob, local_today())
}

/// Same as `parse_journal` with an explicit fallback date.
pub fn parse_journal_as_of(blob: &str, today: NaiveDate) -> Vec<ParsedEntry> {
    if blob.trim().is_empty() {
        return Vec::new();
    }

    split_blocks(blob)
        .into_iter()
        .filter(|block| is_entry_block(block))
        .map(|block| parse_block(block, today))
        .collect()
}

/// Segment the blob at "Trading Journal <Month> <Day>, <Year>" headings,
/// falling back to bare month-name dates when no heading exists anywhere.
fn split_blocks(blob: &str) -> Vec<&str> {
    let mut anchors: Vec<usize> = HEADING_RE.find_iter(blob).map(|m| m.start()).collect();
    if anchors.is_empty() {
        anchors = MONTH_DATE_RE.find_iter(blob).map(|m| m.start()).collect();
    }
    if anchors.is_empty() {
        return vec![blob];
    }

    let mut blocks = Vec::new();
    if anchors[0] > 0 {
        // Text before the first anchor is its own candidate (usually
        // boilerplate, dropped by the keyword filter).
        blocks.push(&blob[..anchors[0]]);
    }
    for (i, &start) in anchors.iter().enumerate() {
        let end = anchors.get(i + 1).copied().unwrap_or(blob.len());
        blocks.push(&blob[start..end]);
    }
    blocks
}

fn is_entry_block(block: &str) -> bool {
    let trimmed = block.trim();
    if trimmed.len() < MIN_BLOCK_LEN {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    ENTRY_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

fn parse_block(block: &str, today: NaiveDate) -> ParsedEntry {
    let trimmed = block.trim();

    ParsedEntry {
        date: extract_date(trimmed).unwrap_or(today),
        conviction: extract_line_field(trimmed, &CONVICTION_RE),
        setup: SetupDetails {
            entry_method: extract_line_field(trimmed, &ENTRY_FIELD_RE),
            position_size: extract_line_field(trimmed, &SIZE_FIELD_RE),
            risk: extract_line_field(trimmed, &RISK_FIELD_RE),
            exit_method: extract_line_field(trimmed, &EXIT_FIELD_RE),
        },
        lessons: extract_lessons(trimmed),
        sessions: extract_sessions(trimmed),
        trade_management: extract_section(trimmed, &TRADE_MGMT_RE),
        missed_opportunities: extract_section(trimmed, &MISSED_RE),
        final_thoughts: extract_section(trimmed, &FINAL_THOUGHTS_RE),
        raw_content: trimmed.to_string(),
    }
}

/// Date patterns tried in order, first match wins. No match is not an
/// error: the caller substitutes the processing date.
fn extract_date(block: &str) -> Option<NaiveDate> {
    for re in [&HEADING_RE, &MONTH_DATE_RE] {
        if let Some(date) = re.captures(block).and_then(|caps| month_name_date(&caps)) {
            return Some(date);
        }
    }

    if let Some(date) = NUMERIC_MDY_RE.captures(block).and_then(|caps| {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }) {
        return Some(date);
    }

    ISO_DATE_RE.captures(block).and_then(|caps| {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

fn month_name_date(caps: &Captures) -> Option<NaiveDate> {
    let month = TimeUtils::month_to_number(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn extract_line_field(block: &str, re: &Regex) -> Option<String> {
    let caps = re.captures(block)?;
    let value = caps.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Capture a labeled section: inline text after the colon plus following
/// lines up to the next recognized section heading.
fn extract_section(block: &str, label_re: &Regex) -> Option<String> {
    let caps = label_re.captures(block)?;
    let whole = caps.get(0)?;

    let mut parts: Vec<&str> = Vec::new();
    if let Some(inline) = caps.get(1) {
        let inline = inline.as_str().trim();
        if !inline.is_empty() {
            parts.push(inline);
        }
    }

    for line in block[whole.end()..].lines() {
        if is_section_heading(line) {
            break;
        }
        parts.push(line);
    }

    let body = parts.join("\n").trim().to_string();
    (!body.is_empty()).then_some(body)
}

fn is_section_heading(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    SECTION_LABELS.iter().any(|label| {
        lowered
            .strip_prefix(label)
            .is_some_and(|rest| rest.trim_start().starts_with(':'))
    })
}

fn extract_sessions(block: &str) -> Vec<(String, String)> {
    let mut sessions = Vec::new();
    for (name, re) in [
        ("morning", &MORNING_RE),
        ("afternoon", &AFTERNOON_RE),
        ("night", &NIGHT_RE),
    ] {
        if let Some(text) = extract_section(block, re) {
            sessions.push((name.to_string(), text));
        }
    }
    sessions
}

/// Lessons come from two places: the "Lessons Learned" section body split
/// on list markers, and standalone "Lesson <n>:" lines anywhere in the
/// block. Combined, noise-filtered, deduplicated in first-seen order.
fn extract_lessons(block: &str) -> Vec<String> {
    let mut lessons: Vec<String> = Vec::new();

    if let Some(body) = extract_section(block, &LESSONS_SECTION_RE) {
        lessons.extend(
            LESSON_SPLIT_RE
                .split(&body)
                .map(str::trim)
                .filter(|fragment| fragment.len() >= MIN_LESSON_LEN)
                .map(str::to_string),
        );
    }

    lessons.extend(
        STANDALONE_LESSON_RE
            .captures_iter(block)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
            .filter(|lesson| lesson.len() >= MIN_LESSON_LEN),
    );

    lessons.into_iter().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    const WELL_FORMED: &str = "Trading Journal - March 21, 2025\n\
        Overall Conviction: Bullish above 19850\n\
        Entry: retest of key level\n\
        Position Size: 1 NQ\n\
        Risk: $300\n\
        Exit: first target at the high\n\
        Morning Session: waited for close above the level, took the long on the retest\n\
        Lessons Learned:\n\
        1. waited for close before entering\n\
        2. be stop took me out of the runner\n\
        Final Thoughts: good process day overall";

    #[test]
    fn single_block_round_trip() {
        let entries = parse_journal_as_of(WELL_FORMED, fixed_today());
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
        assert_eq!(entry.raw_content, WELL_FORMED.trim());
        assert_eq!(
            entry.conviction.as_deref(),
            Some("Bullish above 19850")
        );
        assert_eq!(entry.setup.entry_method.as_deref(), Some("retest of key level"));
        assert_eq!(entry.setup.position_size.as_deref(), Some("1 NQ"));
        assert_eq!(entry.setup.risk.as_deref(), Some("$300"));
        assert_eq!(entry.setup.exit_method.as_deref(), Some("first target at the high"));
        assert_eq!(
            entry.session("morning"),
            Some("waited for close above the level, took the long on the retest")
        );
        assert_eq!(
            entry.lessons,
            vec![
                "waited for close before entering".to_string(),
                "be stop took me out of the runner".to_string(),
            ]
        );
        assert_eq!(entry.final_thoughts.as_deref(), Some("good process day overall"));
    }

    #[test]
    fn splits_multiple_entries_on_headings() {
        let blob = format!(
            "{WELL_FORMED}\nTrading Journal - March 24, 2025\nConviction: Bearish\nEntry: failed retest short\nExecution was clean today."
        );
        let entries = parse_journal_as_of(&blob, fixed_today());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
        assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2025, 3, 24).unwrap());
        assert_eq!(entries[1].conviction.as_deref(), Some("Bearish"));
    }

    #[test]
    fn falls_back_to_bare_month_dates_without_heading() {
        let blob = "April 2, 2025\nSetup: balance break\nEntry: drove through and retested, waited for confirmation before sizing in.";
        let entries = parse_journal_as_of(blob, fixed_today());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    }

    #[test]
    fn resolves_month_abbreviations() {
        for (name, month) in [("Sept", 9), ("sep", 9), ("Dec", 12)] {
            let blob = format!(
                "Trading Journal - {name} 12, 2025\nEntry: waited at the level, long conviction, clean execution through the session"
            );
            let entries = parse_journal_as_of(&blob, fixed_today());
            assert_eq!(entries.len(), 1, "month {name}");
            assert_eq!(
                entries[0].date,
                NaiveDate::from_ymd_opt(2025, month, 12).unwrap()
            );
        }
    }

    #[test]
    fn numeric_dates_are_tried_after_month_names() {
        let blob = "Journal notes 03/21/2025\nEntry: long off the open drive, conviction was high after the level held overnight.";
        let entries = parse_journal_as_of(blob, fixed_today());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());

        let blob_iso = "Notes for 2025-03-22\nEntry: same setup as yesterday, conviction lower, execution sloppy into lunch.";
        let entries = parse_journal_as_of(blob_iso, fixed_today());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 3, 22).unwrap());
    }

    #[test]
    fn missing_labels_leave_fields_unset() {
        let blob = "Trading Journal - March 21, 2025\nRough session, poor execution all morning, nothing lined up with the plan.";
        let entries = parse_journal_as_of(blob, fixed_today());
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert!(entry.conviction.is_none());
        assert!(entry.setup.is_empty());
        assert!(entry.lessons.is_empty());
        assert!(entry.sessions.is_empty());
        assert!(entry.trade_management.is_none());
        assert!(entry.final_thoughts.is_none());
    }

    #[test]
    fn undateable_block_gets_processing_date() {
        let blob = "Entry: no date anywhere in this one but the setup and execution notes are long enough to keep.";
        let entries = parse_journal_as_of(blob, fixed_today());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, fixed_today());
    }

    #[test]
    fn short_or_keywordless_blocks_are_discarded() {
        assert!(parse_journal_as_of("Entry: tiny", fixed_today()).is_empty());
        let keywordless =
            "Nothing in this paragraph mentions any of the journal markers at all, so it is boilerplate.";
        assert!(parse_journal_as_of(keywordless, fixed_today()).is_empty());
    }

    #[test]
    fn never_fails_on_arbitrary_input() {
        for blob in ["", " \n\t ", "a", "🙂🙂🙂", "::::\n----\n1234", "\u{0}\u{1}"] {
            let _ = parse_journal_as_of(blob, fixed_today());
        }
    }

    #[test]
    fn standalone_lessons_are_merged_and_deduped() {
        let blob = "Trading Journal - May 5, 2025\n\
            Entry: breakout retest\n\
            Lessons Learned:\n\
            - waited for close before entering\n\
            - tiny\n\
            Final Thoughts: solid patience today\n\
            Lesson 2: waited for close before entering\n\
            Lesson 3: respect the sizing ladder on red days";
        let entries = parse_journal_as_of(blob, fixed_today());
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].lessons,
            vec![
                "waited for close before entering".to_string(),
                "respect the sizing ladder on red days".to_string(),
            ]
        );
    }
}
