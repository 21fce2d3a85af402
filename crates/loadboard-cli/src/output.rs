//! Output formatting module

use loadboard_app::app::BoardView;
use loadboard_domain::model::PostingRecord;
use loadboard_types::{OutputFormat, Result};

pub fn output_postings(output_format: OutputFormat, postings: &[PostingRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(postings)?);
        return Ok(());
    }

    if postings.is_empty() {
        println!("No postings found.");
        return Ok(());
    }

    print_posting_table(postings);
    println!("\n{} posting(s)", postings.len());
    Ok(())
}

pub fn output_posting(output_format: OutputFormat, posting: &PostingRecord) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(posting)?);
        return Ok(());
    }

    println!("\nLoad Posted");
    println!("===========");
    println!("ID:            {}", posting.id);
    println!("Lane:          {} -> {}", posting.origin, posting.destination);
    println!("Distance:      {} mi", posting.distance);
    println!("Rate:          ${:.2}", posting.rate);
    println!("Rate/mile:     ${:.2}", posting.effective_rate_per_mile());
    println!("Equipment:     {}", posting.equipment);
    println!("Broker:        {}", posting.broker);
    if !posting.broker_email.is_empty() {
        println!("Broker email:  {}", posting.broker_email);
    }
    if let Some(date) = posting.pickup_date {
        println!("Pickup:        {}", date);
    }
    if !posting.commodity.is_empty() {
        println!("Commodity:     {}", posting.commodity);
    }
    println!("Status:        {}", posting.status);
    Ok(())
}

pub fn output_board(output_format: OutputFormat, view: &BoardView, filter: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    let summary = &view.summary;
    println!("\nLoad Board");
    println!("==========");
    println!("Total loads:     {}", summary.total_loads);
    println!("Avg rate/mile:   ${:.2}", summary.avg_rate_per_mile);
    println!("Total value:     ${:.0}", summary.total_value);
    println!("Total miles:     {}", summary.total_miles);
    println!();

    if view.postings.is_empty() {
        if filter.is_empty() {
            println!("No loads available.");
        } else {
            println!("No loads match \"{}\".", filter);
        }
        return Ok(());
    }

    print_posting_table(&view.postings);
    if !filter.is_empty() {
        println!("\nShowing {} of {} loads", view.postings.len(), summary.total_loads);
    }
    Ok(())
}

fn print_posting_table(postings: &[PostingRecord]) {
    println!(
        "{:<24} {:<24} {:>7} {:>10} {:>7} {:<10} {:<16} {:<10}",
        "Origin", "Destination", "Miles", "Rate", "$/mi", "Equipment", "Broker", "Pickup"
    );
    println!("{}", "-".repeat(115));

    for p in postings {
        println!(
            "{:<24} {:<24} {:>7} {:>10.2} {:>7.2} {:<10} {:<16} {:<10}",
            truncate(&p.origin, 24),
            truncate(&p.destination, 24),
            p.distance,
            p.rate,
            p.effective_rate_per_mile(),
            truncate(&p.equipment, 10),
            truncate(&p.broker, 16),
            p.pickup_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
        );
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
