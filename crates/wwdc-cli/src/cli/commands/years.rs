//! `wwdc-dl years` – show the year buckets of the pattern table.

use wwdc_core::patterns;

pub fn run_years() {
    println!("{:<8} {}", "YEAR", "URL RULES");
    for (year, label) in patterns::listed_years() {
        println!("{:<8} {}", year, label);
    }
    println!("{:<8} {}", "other", patterns::default_rules().label);
}
