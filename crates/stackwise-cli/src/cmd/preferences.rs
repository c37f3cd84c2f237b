use super::open_advisor;
use crate::output::{print_json, print_store_warnings, print_table};
use anyhow::Context;
use std::path::Path;

fn score_rows(scores: &[(String, f64)]) -> Vec<Vec<String>> {
    scores
        .iter()
        .map(|(name, score)| vec![name.clone(), format!("{score:.1}")])
        .collect()
}

pub fn run(home: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let advisor = open_advisor(home)?;
    let summary = advisor
        .preferences_summary()
        .context("failed to load preferences")?;

    if json {
        return print_json(&summary);
    }

    print_store_warnings(&summary.store_warnings);

    println!("Languages:");
    print_table(&["LANGUAGE", "SCORE"], score_rows(&summary.top_languages));
    println!();
    println!("Frontend frameworks:");
    print_table(&["FRAMEWORK", "SCORE"], score_rows(&summary.top_frontends));
    println!();
    println!("Backend frameworks:");
    print_table(&["FRAMEWORK", "SCORE"], score_rows(&summary.top_backends));

    println!();
    if summary.top_combinations.is_empty() {
        println!("No combinations learned yet.");
    } else {
        println!("Most used combinations:");
        let rows = summary
            .top_combinations
            .iter()
            .map(|(sig, count)| vec![sig.replace('+', " + "), count.to_string()])
            .collect();
        print_table(&["COMBINATION", "COUNT"], rows);
    }

    println!();
    println!("Settings:");
    println!("  Open source bias:      {:.1}", summary.open_source_bias);
    println!("  Complexity preference: {}", summary.complexity_preference.as_str());
    println!("  Preferred licenses:    {}", summary.license_preferences.join(", "));
    println!("  Learning rate:         {:.1}", summary.learning_rate);
    Ok(())
}
