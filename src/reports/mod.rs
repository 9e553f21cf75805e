use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mixforge::catalog::Catalog;
use mixforge::optimizer::SearchResult;
use mixforge::scorer::{ActiveEffects, BaseEffectOutcome, MixStep};

fn money(v: f64) -> String {
    format!("${:.2}", v)
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_effects(title: &str, effects: &ActiveEffects) {
    println!("\n{}", title);
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("Effect").add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    for (effect, value) in effects.sorted_by_value() {
        table.add_row(vec![Cell::new(effect), Cell::new(format!("{:.2}", value))]);
    }
    right_align(&mut table, 1..=1);
    println!("{}", table);
}

pub fn print_search_result(catalog: &Catalog, result: &SearchResult, base_value: f64) {
    println!("\n=== 🏆 BEST MIX ===");

    let mut table = base_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Item").add_attribute(Attribute::Bold),
        Cell::new("Effect"),
        Cell::new("Price").fg(Color::Yellow),
    ]);
    for (i, name) in result.combination.iter().enumerate() {
        let (effect, price) = match catalog.items.by_name(name) {
            Some(item) => (item.effect.to_string(), money(item.price)),
            None => ("?".to_string(), "?".to_string()),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(name),
            Cell::new(effect),
            Cell::new(price),
        ]);
    }
    right_align(&mut table, 3..=3);
    println!("{}", table);

    print_effects("Active effects:", &result.effects);

    let mut summary = base_table();
    summary.add_row(vec![
        Cell::new("Multiplier"),
        Cell::new(format!("x{:.2}", result.multiplier)),
    ]);
    summary.add_row(vec![Cell::new("Cost"), Cell::new(money(result.cost))]);
    summary.add_row(vec![
        Cell::new("Sell price"),
        Cell::new(money(base_value * result.multiplier)),
    ]);
    summary.add_row(vec![
        Cell::new("Profit").add_attribute(Attribute::Bold),
        Cell::new(money(result.profit)).fg(Color::Green),
    ]);
    right_align(&mut summary, 1..=1);
    println!("{}", summary);

    let s = &result.stats;
    println!(
        "Generations: {} | Evaluations: {} | Orderings: {} | {:.2}s",
        s.generations,
        s.evaluations,
        s.permutations_tested,
        s.elapsed_ms as f64 / 1000.0
    );
}

pub fn print_mix_trace(steps: &[MixStep]) {
    println!("\n=== 🧪 MIX TRACE ===");
    let mut table = base_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Item").add_attribute(Attribute::Bold),
        Cell::new("Base effect"),
        Cell::new("Rules fired").fg(Color::Cyan),
        Cell::new("Active after"),
    ]);

    for (i, step) in steps.iter().enumerate() {
        let base = match step.outcome {
            BaseEffectOutcome::Added => format!("+{}", step.base_effect),
            BaseEffectOutcome::AlreadyActive => format!("={}", step.base_effect),
            BaseEffectOutcome::DroppedAtCeiling => format!("x{} (full)", step.base_effect),
        };

        let mut fired: Vec<String> = step
            .fired
            .iter()
            .map(|r| format!("{} -> {}", r.trigger, r.replacement))
            .collect();
        fired.extend(
            step.exempt
                .iter()
                .map(|r| format!("({} -> {} skipped)", r.trigger, r.replacement)),
        );

        let after: Vec<String> = step.after.effects().map(|e| e.to_string()).collect();

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&step.item),
            Cell::new(base),
            Cell::new(fired.join("\n")),
            Cell::new(after.join(", ")),
        ]);
    }
    println!("{}", table);
}

pub fn print_catalog(catalog: &Catalog) {
    println!("\n=== 📚 EFFECTS ===");
    let mut effects = base_table();
    effects.set_header(vec![
        Cell::new("Effect").add_attribute(Attribute::Bold),
        Cell::new("Multiplier").fg(Color::Cyan),
    ]);
    let mut sorted: Vec<_> = catalog.effects.iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (effect, value) in sorted {
        effects.add_row(vec![Cell::new(effect), Cell::new(format!("{:.2}", value))]);
    }
    right_align(&mut effects, 1..=1);
    println!("{}", effects);

    println!("\n=== 🧺 ITEMS ===");
    let mut items = base_table();
    items.set_header(vec![
        Cell::new("Item").add_attribute(Attribute::Bold),
        Cell::new("Price").fg(Color::Yellow),
        Cell::new("Effect"),
        Cell::new("Rules"),
    ]);
    for item in catalog.items.iter() {
        let rules: Vec<String> = item
            .rules
            .iter()
            .map(|r| format!("{} -> {}", r.trigger, r.replacement))
            .collect();
        items.add_row(vec![
            Cell::new(&item.name),
            Cell::new(money(item.price)),
            Cell::new(item.effect),
            Cell::new(rules.join("\n")),
        ]);
    }
    right_align(&mut items, 1..=1);
    println!("{}", items);

    println!("\n=== 🌿 RAW MATERIALS ===");
    let mut materials = base_table();
    materials.set_header(vec![
        Cell::new("Material").add_attribute(Attribute::Bold),
        Cell::new("Effect"),
        Cell::new("Value").fg(Color::Green),
    ]);
    for m in &catalog.materials {
        let effect = m.effect.map_or_else(|| "-".to_string(), |e| e.to_string());
        materials.add_row(vec![
            Cell::new(&m.name),
            Cell::new(effect),
            Cell::new(money(m.value)),
        ]);
    }
    right_align(&mut materials, 2..=2);
    println!("{}", materials);
}
