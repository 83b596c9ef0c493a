use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::hypothesis::{
    ApproximateMannWhitneyUTest, ExactMannWhitneyUTest, HypothesisTest, MannWhitneyUTest,
};

/// Significance level used for the verdict column.
const ALPHA: f64 = 0.05;

fn styled(table: &mut Table) -> &mut Table {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
}

/// Render a test as a titled table: population details, the p-value for the
/// default tail with a verdict at α = 0.05, then the test's own parameters.
pub fn report(test: &dyn HypothesisTest) -> String {
    let tail = test.default_tail();
    let p_value = test.pvalue(tail);
    let poi = test.parameter_of_interest();

    let p_display = if p_value < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{p_value:.4}")
    };

    let verdict = if p_value < ALPHA {
        "🔴 Reject h₀"
    } else if p_value < 0.10 {
        "🟠 Weak evidence against h₀"
    } else {
        "🟢 Fail to reject h₀"
    };

    let mut title_table = Table::new();
    styled(&mut title_table)
        .add_row(vec![Cell::new(test.name()).set_alignment(CellAlignment::Center)]);

    let mut table = Table::new();
    styled(&mut table).set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Center),
        Cell::new("Value").set_alignment(CellAlignment::Center),
        Cell::new("Interpretation").set_alignment(CellAlignment::Center),
    ]);

    // Population details
    table
        .add_row(vec![
            Cell::new("Parameter of interest"),
            Cell::new(poi.name).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ])
        .add_row(vec![
            Cell::new("Value under h₀"),
            Cell::new(format!("{}", poi.null_value)).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ])
        .add_row(vec![
            Cell::new("Point estimate"),
            Cell::new(format!("{:+.4}", poi.estimate)).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);

    // Test summary
    table
        .add_row(vec![
            Cell::new("p-value"),
            Cell::new(&p_display).set_alignment(CellAlignment::Right),
            Cell::new(verdict),
        ])
        .add_row(vec![
            Cell::new("Tail"),
            Cell::new(tail.as_str()).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);

    for (label, value) in test.params() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
    }

    format!("{title_table}\n{table}")
}

impl Display for ExactMannWhitneyUTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&report(self))
    }
}

impl Display for ApproximateMannWhitneyUTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&report(self))
    }
}

impl Display for MannWhitneyUTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&report(self))
    }
}

#[cfg(test)]
mod tests {
    use crate::{approximate_mann_whitney_u_test, mann_whitney_u_test};

    #[test]
    fn exact_report() {
        let t = mann_whitney_u_test(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        let text = t.to_string();
        assert!(text.contains("Exact Mann-Whitney U test"));
        assert!(text.contains("0.1000"));
        assert!(text.contains("both"));
        assert!(text.contains("[6, 15]"));
        assert!(text.contains("-3.0000"));
    }

    #[test]
    fn approximate_report() {
        let t = approximate_mann_whitney_u_test(&[1.0, 2.0, 2.0, 3.0], &[2.0, 5.0]).unwrap();
        let text = t.to_string();
        assert!(text.contains("Approximate Mann-Whitney U test"));
        assert!(text.contains("normal approximation"));
        assert!(text.contains("Fail to reject"));
    }

    #[test]
    fn tiny_pvalue_is_clamped_in_display() {
        let x: Vec<f64> = (0..40).map(f64::from).collect();
        let y: Vec<f64> = (100..140).map(f64::from).collect();
        let text = mann_whitney_u_test(&x, &y).unwrap().to_string();
        assert!(text.contains("< 0.0001"));
        assert!(text.contains("Reject h₀"));
    }
}
