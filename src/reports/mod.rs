use arith_mahjong::api::{CheckResult, GroupResult, ReadyResult, ScoreReport};
use arith_mahjong::hand::Witness;
use arith_mahjong::pool::Availability;
use arith_mahjong::resolver::{Resolution, Verdict};
use arith_mahjong::scorer::ScoreResult;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_witness(witness: &Witness) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Tiles").add_attribute(Attribute::Bold),
        Cell::new("Reads As").add_attribute(Attribute::Bold),
    ]);

    for (i, group) in witness.groups.iter().enumerate() {
        let tiles: Vec<String> = group.tiles.iter().map(|t| t.to_string()).collect();
        let faces: Vec<String> = group
            .faces
            .iter()
            .map(|f| f.map_or_else(|| "*".to_string(), |f| f.to_string()))
            .collect();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(tiles.join(" ")),
            Cell::new(format!("{:?}  [{}]", group.kind, faces.join(" "))),
        ]);
    }
    println!("{}", table);
}

pub fn print_score(score: &ScoreResult) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Count"),
        Cell::new("Points"),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    for i in 2..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for hit in &score.hits {
        table.add_row(vec![
            Cell::new(hit.category.to_string()),
            Cell::new(hit.category.native_name()),
            Cell::new(hit.count),
            Cell::new(hit.points),
            Cell::new(hit.value()).fg(Color::Cyan),
        ]);
    }
    for ex in &score.excluded {
        table.add_row(vec![
            Cell::new(ex.category.to_string()).fg(Color::DarkGrey),
            Cell::new(format!("implied by {}", ex.subsumed_by)).fg(Color::DarkGrey),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("-"),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!("qualifying {}", score.qualifying)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(score.total).add_attribute(Attribute::Bold),
    ]);
    println!("{}", table);
}

fn print_resolution(res: &Resolution) {
    print_witness(&res.witness);
    print_score(&res.score);
}

pub fn print_check(result: &CheckResult) {
    println!("\nHand: {}", result.hand);
    match &result.verdict {
        Verdict::Win(res) => {
            let how = if result.declared { "declared " } else { "" };
            println!("🀄 WIN: {}{} shape, {} points", how, res.shape, res.score.total);
            print_resolution(res);
        }
        Verdict::BelowThreshold(res) => {
            println!(
                "⚠️  {} shape completes but scores {} qualifying points, below the minimum",
                res.shape, res.score.qualifying
            );
            print_resolution(res);
        }
        Verdict::NoShape => println!("❌ No winning shape."),
    }
}

pub fn print_score_report(report: &ScoreReport) {
    println!("\nHand: {}  (minimum {})", report.hand, report.min_score);
    if report.resolutions.is_empty() {
        println!("❌ No grammar completes this hand.");
        return;
    }

    let mut summary = new_table();
    summary.add_row(vec![
        Cell::new("Shape").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Qualifying"),
        Cell::new("Wins"),
    ]);
    for res in &report.resolutions {
        let wins = res.score.qualifying >= report.min_score;
        summary.add_row(vec![
            Cell::new(res.shape.to_string()).add_attribute(Attribute::Bold),
            Cell::new(res.score.total).fg(Color::Cyan),
            Cell::new(res.score.qualifying),
            if wins {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::Red)
            },
        ]);
    }
    println!("{}", summary);

    for res in &report.resolutions {
        println!("\n{}:", res.shape);
        print_resolution(res);
    }
}

pub fn print_readiness(result: &ReadyResult) {
    println!("\nHand: {}", result.hand);
    if !result.ready {
        println!("❌ Not ready: no single tile completes this hand.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Shape").add_attribute(Attribute::Bold),
        Cell::new("Face"),
        Cell::new("Availability"),
    ]);
    for (shape, waits) in &result.report.waits {
        for wait in waits {
            let status = match wait.availability {
                Availability::Available => Cell::new("available").fg(Color::Green),
                Availability::NeedsWildcard(class) => {
                    Cell::new(format!("wildcard {}", class)).fg(Color::Yellow)
                }
                Availability::Dead => Cell::new("dead").fg(Color::Red),
            };
            table.add_row(vec![
                Cell::new(shape.to_string()),
                Cell::new(wait.face.to_string()).set_alignment(CellAlignment::Center),
                status,
            ]);
        }
    }
    println!("{}", table);
}

pub fn print_group(result: &GroupResult) {
    match &result.group {
        Some(group) => println!("✅ [{}] is valid: {:?}", result.tiles, group.kind),
        None => println!("❌ [{}] is not a valid group", result.tiles),
    }
}
