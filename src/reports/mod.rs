use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sekai_calc::config::RangeParams;
use sekai_calc::score_art::{PointItem, ScoredSolution};
use sekai_calc::score_range::batch::SongRangeRow;
use sekai_calc::tables::MY_SEKAI_POWERS;

pub fn print_range_table(rows: &[SongRangeRow], params: &RangeParams) {
    println!(
        "\nMode: {} | Power: {} | Skills: {} | Bonus: {}% | Fire: {}",
        params.mode, params.total_power, params.skills, params.event_bonus, params.energy
    );

    if rows.is_empty() {
        println!("No charts with coefficient data matched.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Song").add_attribute(Attribute::Bold),
        Cell::new("Diff"),
        Cell::new("Min").fg(Color::Red),
        Cell::new("Max").fg(Color::Green),
        Cell::new("Min EP"),
        Cell::new("Max EP").fg(Color::Cyan),
        Cell::new("Best Order"),
    ]);

    for i in 2..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in rows {
        let order = row
            .range
            .max_permutation
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        table.add_row(vec![
            Cell::new(row.music_id),
            Cell::new(row.difficulty),
            Cell::new(row.range.min),
            Cell::new(row.range.max),
            Cell::new(row.min_event_point),
            Cell::new(row.max_event_point),
            Cell::new(order),
        ]);
    }
    println!("{}", table);
}

pub fn print_solutions(solutions: &[ScoredSolution], page: usize, per_page: usize) {
    if solutions.is_empty() {
        println!("\nNo combination closes this gap with the current settings.");
        return;
    }

    let per_page = per_page.max(1);
    let total_pages = solutions.len().div_ceil(per_page);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;

    println!(
        "\n=== 🎯 {} PLANS (page {}/{}) ===",
        solutions.len(),
        page,
        total_pages
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Plays"),
        Cell::new("Games"),
        Cell::new("Fire").fg(Color::Red),
        Cell::new("MySekai Pt").fg(Color::Cyan),
        Cell::new("Mod5"),
        Cell::new("Brackets"),
    ]);

    for i in 2..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (offset, sol) in solutions.iter().skip(start).take(per_page).enumerate() {
        let groups = sol.grouped();
        let plays = groups
            .iter()
            .map(|(item, count)| format!("{} x{}", item_label(item), count))
            .collect::<Vec<_>>()
            .join("\n");
        let brackets = groups
            .iter()
            .map(|(item, _)| bracket_hint(item))
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            Cell::new(start + offset + 1),
            Cell::new(plays),
            Cell::new(sol.total_games),
            Cell::new(sol.total_fire),
            Cell::new(sol.total_my_sekai_score),
            Cell::new(if sol.is_all_envy_mod5 { "yes" } else { "no" }),
            Cell::new(brackets),
        ]);
    }
    println!("{}", table);
}

fn item_label(item: &PointItem) -> String {
    match item {
        PointItem::Envy(e) => format!("Envy {}", e.ep),
        PointItem::MySekai(m) => format!("MySekai {}", m.ep),
    }
}

// Shortest way to hit the item: lowest bonus bracket, or lowest power tier.
fn bracket_hint(item: &PointItem) -> String {
    match item {
        PointItem::Envy(e) => e
            .details
            .iter()
            .flat_map(|d| d.brackets.iter())
            .min_by_key(|b| (b.bonus, b.min_score))
            .map(|b| format!("{}% @ {}-{}", b.bonus, b.min_score, b.max_score))
            .unwrap_or_default(),
        PointItem::MySekai(m) => m
            .details
            .iter()
            .flat_map(|d| d.valid_reqs.iter())
            .min_by_key(|r| r.req_mult)
            .map(|r| {
                let power = MY_SEKAI_POWERS.get(r.power_idx).copied().unwrap_or_default();
                format!("{}% @ power {}", r.req_mult, power)
            })
            .unwrap_or_default(),
    }
}
