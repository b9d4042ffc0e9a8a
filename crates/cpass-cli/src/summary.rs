//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cpass_cli::report::{CertifyReport, ColumnsReport, FragmentLine, OnboardReport};
use cpass_model::{ConfidenceTier, ReadinessBucket};
use cpass_taxonomy::{DanglingReference, Taxonomy, TaxonomyStats};

pub fn print_taxonomy(taxonomy: &Taxonomy, domain: Option<&str>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Skill"),
        header_cell("Name"),
        header_cell("Domain"),
        header_cell("Complexity"),
        header_cell("Synonyms"),
    ]);
    apply_table_style(&mut table);
    let mut count = 0usize;
    for skill in taxonomy
        .skills()
        .iter()
        .filter(|s| domain.is_none_or(|d| s.domain.eq_ignore_ascii_case(d)))
    {
        count += 1;
        table.add_row(vec![
            Cell::new(skill.id.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&skill.name),
            Cell::new(&skill.domain),
            Cell::new(taxonomy.complexity_of(skill.id.as_str())),
            dim_cell(skill.synonyms.join("; ")),
        ]);
    }
    println!("Taxonomy {}: {count} skills", taxonomy.version());
    println!("{table}");
}

pub fn print_stats(stats: &TaxonomyStats) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Canonical tasks"), Cell::new(stats.total_canonical_tasks)]);
    table.add_row(vec![Cell::new("Skills"), Cell::new(stats.total_skills)]);
    for (domain, count) in &stats.skills_by_domain {
        table.add_row(vec![dim_cell(format!("  {domain}")), Cell::new(count)]);
    }
    table.add_row(vec![Cell::new("Requirement phrases"), Cell::new(stats.total_requirements)]);
    table.add_row(vec![Cell::new("Certifications"), Cell::new(stats.total_certifications)]);
    table.add_row(vec![Cell::new("Occupations"), Cell::new(stats.total_occupations)]);
    println!("Taxonomy {}", stats.version);
    println!("{table}");
}

pub fn print_columns(report: &ColumnsReport) {
    match report.data_tier {
        Some(tier) => println!("Data tier: {tier}"),
        None => println!("Data tier: not detected"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Samples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in &report.columns {
        let field = if column.field == "ignore" {
            dim_cell(&column.field)
        } else {
            Cell::new(&column.field)
        };
        let confidence = if column.overridden {
            Cell::new("manual").fg(Color::Cyan)
        } else {
            percent_cell(column.confidence)
        };
        table.add_row(vec![
            Cell::new(&column.column),
            field,
            confidence,
            dim_cell(column.samples.join(" | ")),
        ]);
    }
    println!("{table}");
    let summary = &report.summary;
    println!(
        "{} columns: {} mapped, {} ignored, {} overridden (high {}, medium {}, low {})",
        summary.total_columns,
        summary.mapped,
        summary.ignored,
        summary.overridden,
        summary.high,
        summary.medium,
        summary.low
    );
    let unrecognized: Vec<&str> = report.unrecognized().map(|c| c.column.as_str()).collect();
    if !unrecognized.is_empty() {
        println!(
            "Unrecognized: {} (use --map COLUMN=FIELD to assign)",
            unrecognized.join(", ")
        );
    }
}

pub fn print_fragments(lines: &[FragmentLine]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Fragment"),
        header_cell("Skill"),
        header_cell("Confidence"),
        header_cell("Tier"),
        header_cell("Matched"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for line in lines {
        let skill = match (&line.skill_id, &line.skill_name) {
            (Some(id), Some(name)) => Cell::new(format!("{id} {name}")),
            (Some(id), None) => Cell::new(format!("{id} (not in taxonomy)")).fg(Color::Red),
            _ => dim_cell("-"),
        };
        let confidence = line.confidence.map_or_else(|| dim_cell("-"), percent_cell);
        let tier = line.tier.map_or_else(|| dim_cell("-"), tier_cell);
        let matched = match &line.canonical_task {
            Some(task) => Cell::new(task),
            None if line.outcome == "matched" => dim_cell("synonym"),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(&line.fragment), skill, confidence, tier, matched]);
    }
    println!("{table}");
}

pub fn print_onboard(report: &OnboardReport) {
    println!("Batch: {}", report.batch_id);
    match report.data_tier {
        Some(tier) => println!("Data tier: {tier}"),
        None => println!("Data tier: not detected"),
    }
    if let Some(path) = &report.mapping_path {
        println!("Mapping: {path}");
    }
    if let Some(path) = &report.store_path {
        println!("Stored: {path}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Worker"),
        header_cell("Name"),
        header_cell("Invitation"),
        header_cell("Skills"),
        header_cell("Match %"),
        header_cell("Readiness"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for worker in &report.workers {
        let skills: Vec<&str> = worker.skills.iter().map(|s| s.as_str()).collect();
        table.add_row(vec![
            dim_cell(&worker.worker_id),
            Cell::new(&worker.name),
            Cell::new(&worker.invitation_code),
            if skills.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(skills.join(", "))
            },
            Cell::new(worker.certification_match_percentage),
            readiness_cell(worker.readiness),
        ]);
    }
    let summary = &report.summary;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} workers", summary.total_workers)).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{} matches", summary.total_matches)).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{} ready, {} in progress",
            summary.ready, summary.in_progress
        ))
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Matches: {} high, {} medium, {} low; average confidence {:.0}%",
        summary.high_confidence,
        summary.medium_confidence,
        summary.low_confidence,
        summary.average_confidence * 100.0
    );
    if report.rejected_matches > 0 {
        println!(
            "Rejected {} matches naming skills missing from the taxonomy",
            report.rejected_matches
        );
    }
    if report.stopped_early {
        println!(
            "Stopped after {} of {} rows",
            report.processed_rows, report.total_rows
        );
    }
}

pub fn print_certify(report: &CertifyReport) {
    if !report.unknown_skills.is_empty() {
        eprintln!("Unknown skills ignored: {}", report.unknown_skills.join(", "));
    }
    let mut skills = Table::new();
    skills.set_header(vec![
        header_cell("Skill"),
        header_cell("Name"),
        header_cell("Complexity"),
        header_cell("Proficiency"),
    ]);
    apply_table_style(&mut skills);
    for skill in &report.skills {
        skills.add_row(vec![
            Cell::new(skill.skill_id.as_str()),
            Cell::new(&skill.name),
            Cell::new(skill.complexity),
            skill.proficiency.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{skills}");
    if let Some(score) = report.trust_score {
        println!("Trust score: {score}");
    }

    let mut certifications = Table::new();
    certifications.set_header(vec![
        header_cell("Certification"),
        header_cell("Met"),
        header_cell("%"),
        header_cell("Missing"),
    ]);
    apply_summary_table_style(&mut certifications);
    align_column(&mut certifications, 1, CellAlignment::Right);
    align_column(&mut certifications, 2, CellAlignment::Right);
    for cert in &report.certifications {
        let missing = cert.missing_requirements();
        certifications.add_row(vec![
            Cell::new(&cert.certification).add_attribute(Attribute::Bold),
            Cell::new(format!("{}/{}", cert.matched, cert.total)),
            coverage_cell(cert.percentage),
            if missing.is_empty() {
                Cell::new("✓").fg(Color::Green)
            } else {
                dim_cell(missing.join("; "))
            },
        ]);
    }
    println!();
    println!("Certifications:");
    println!("{certifications}");

    let mut pathways = Table::new();
    pathways.set_header(vec![
        header_cell("Occupation"),
        header_cell("ISCO"),
        header_cell("Foundation"),
        header_cell("%"),
        header_cell("Missing skills"),
    ]);
    apply_summary_table_style(&mut pathways);
    align_column(&mut pathways, 3, CellAlignment::Right);
    for pathway in &report.pathways {
        let missing: Vec<&str> = pathway.missing_skills.iter().map(|s| s.as_str()).collect();
        pathways.add_row(vec![
            Cell::new(&pathway.title),
            dim_cell(&pathway.isco_code),
            if pathway.foundation_complete {
                Cell::new("complete").fg(Color::Green)
            } else {
                Cell::new("incomplete").fg(Color::Yellow)
            },
            coverage_cell(pathway.match_percentage),
            dim_cell(missing.join(", ")),
        ]);
    }
    println!();
    println!("Occupation pathways:");
    println!("{pathways}");
}

pub fn print_dangling(references: &[DanglingReference]) {
    if references.is_empty() {
        println!("Taxonomy OK: every reference names a defined skill");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Source"), header_cell("Undefined skill")]);
    apply_table_style(&mut table);
    for reference in references {
        table.add_row(vec![
            Cell::new(&reference.source),
            Cell::new(&reference.skill_id).fg(Color::Red),
        ]);
    }
    println!("{table}");
    println!(
        "{} references to undefined skills; matches to them are rejected",
        references.len()
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn percent_cell(confidence: f32) -> Cell {
    Cell::new(format!("{:.0}%", confidence * 100.0))
}

fn coverage_cell(percentage: u8) -> Cell {
    let cell = Cell::new(percentage);
    match percentage {
        100 => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        0 => cell.fg(Color::DarkGrey),
        _ => cell,
    }
}

fn tier_cell(tier: ConfidenceTier) -> Cell {
    match tier {
        ConfidenceTier::High => Cell::new(tier).fg(Color::Green),
        ConfidenceTier::Medium => Cell::new(tier).fg(Color::Yellow),
        ConfidenceTier::Low => Cell::new(tier).fg(Color::Red),
    }
}

fn readiness_cell(readiness: ReadinessBucket) -> Cell {
    match readiness {
        ReadinessBucket::Ready => Cell::new(readiness)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        ReadinessBucket::InProgress => Cell::new(readiness).fg(Color::Yellow),
        ReadinessBucket::EarlyStage => dim_cell(readiness),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
