use anyhow::{Context, Result};
use clap::Parser;
use tabled::{Table, Tabled, settings::Style};

use journal_lens::{
    AnalysisPipeline, Cli, JournalEntry, JournalStore, SqliteJournalStore, TagShare, aggregate,
    generate_plan, parse_journal,
    utils::local_today,
};

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Count")]
    count: usize,
}

impl From<&TagShare> for ShareRow {
    fn from(share: &TagShare) -> Self {
        Self {
            tag: share.tag.to_string(),
            share: format!("{:.1}%", share.percentage),
            count: share.count,
        }
    }
}

fn print_family(title: &str, shares: &[TagShare]) {
    println!("\n{title}");
    if shares.is_empty() {
        println!("  (none detected)");
        return;
    }
    let rows: Vec<ShareRow> = shares.iter().map(ShareRow::from).collect();
    println!("{}", Table::new(rows).with(Style::sharp()));
}

#[tokio::main]
async fn main() -> Result<()> {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("journal_lens"), my_code_level)
        .init();

    let args = Cli::parse();
    let raw = tokio::fs::read_to_string(&args.path)
        .await
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let parsed = parse_journal(&raw);
    if parsed.is_empty() {
        println!("No journal entries recognized in {}", args.path.display());
        return Ok(());
    }

    let pipeline = AnalysisPipeline::rule_only();
    let mut entries: Vec<JournalEntry> = parsed.iter().map(JournalEntry::from_parsed).collect();
    pipeline.analyze_all(&mut entries).await;

    println!("Analyzed {} entries", entries.len());
    for entry in &entries {
        let score = entry
            .process_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("\n{}  score {}", entry.date, score);
        for tag in &entry.detected_tags {
            println!(
                "    {} ({}, {})  [{}]",
                tag.tag,
                tag.severity,
                tag.confidence,
                tag.matched_phrases.join(", ")
            );
        }
    }

    let report = aggregate(&entries);
    println!("\nMean process score: {:.1}", report.mean_score);
    print_family("Strengths", &report.strengths);
    print_family("Weaknesses", &report.weaknesses);

    let as_of = args.as_of.unwrap_or_else(local_today);
    let plan = generate_plan(&entries, as_of);
    println!("\nPlan for {as_of}");
    println!("  Risk cap:      {}", plan.risk_cap);
    println!("  Max stop:      {}", plan.max_stop);
    println!("  Sizing ladder: {}", plan.sizing_ladder);
    println!("  Chop filter:           {}", plan.chop_filter);
    println!("  BE after structure:    {}", plan.be_after_structure);
    println!("  Retest only:           {}", plan.retest_only);
    println!("  No first 5 min:        {}", plan.no_first_5_min);
    println!("  No data candle:        {}", plan.no_data_candle);
    println!("  Two-strike rule:       {}", plan.two_strike_rule);
    println!("  Bias flip protocol:    {}", plan.bias_flip_protocol);
    if !plan.reminders.is_empty() {
        println!("  Reminders:");
        for reminder in &plan.reminders {
            println!("    - {reminder}");
        }
    }

    if let Some(db) = &args.db {
        let store = SqliteJournalStore::new(&db.to_string_lossy()).await?;
        for entry in &entries {
            store.put(entry).await?;
        }
        println!("\nSaved {} entries to {}", entries.len(), db.display());
    }

    Ok(())
}
