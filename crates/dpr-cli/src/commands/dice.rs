use comfy_table::{ContentArrangement, Table};
use dpr_mechanics::DiceExpr;
use dpr_mechanics::dice::evaluate;

use super::fmt_damage;

pub fn run(exprs: &[String]) -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Expression", "Parsed", "Average"]);

    for expr in exprs {
        let parsed = describe(expr);
        table.add_row(vec![expr.clone(), parsed, fmt_damage(evaluate(expr))]);
    }

    println!("{table}");
    Ok(())
}

fn describe(expr: &str) -> String {
    if expr.contains(['d', 'D']) {
        return DiceExpr::parse(expr).map_or_else(|| "invalid".to_string(), |d| d.to_string());
    }
    match expr.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => "constant".to_string(),
        _ => "invalid".to_string(),
    }
}
