//! Text rendering for the terminal front-end.
//!
//! Everything here is a pure function from values to strings so the binary
//! stays a thin shell and the output format can be tested directly.

use crate::adder::AdderOutcome;
use std::fmt::Write;

/// Title shown above the bar chart.
pub const CHART_TITLE: &str = "4-bit Quantum Addition";

/// Renders bits as a bracketed list, e.g. `[0, 0, 1, 1]`.
pub fn binary_list(bits: &[bool]) -> String {
    let items: Vec<&str> = bits.iter().map(|b| if *b { "1" } else { "0" }).collect();
    format!("[{}]", items.join(", "))
}

/// `Sum (binary): [1, 0, 0, 0]  | Carry: 0`
pub fn sum_line(outcome: &AdderOutcome) -> String {
    format!(
        "Sum (binary): {}  | Carry: {}",
        binary_list(&outcome.sum_bits_msb_first()),
        u8::from(outcome.carry_out)
    )
}

/// `Sum (decimal): 8`
pub fn decimal_line(outcome: &AdderOutcome) -> String {
    format!("Sum (decimal): {}", outcome.sum_decimal)
}

/// Horizontal bar chart, one row per `(label, value)`.
///
/// Bars are scaled so the largest value spans `width` cells; a non-zero
/// value always gets at least one cell.
pub fn bar_chart(title: &str, bars: &[(&str, u32)], width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max_value = bars.iter().map(|(_, v)| *v).max().unwrap_or(0);

    for (label, value) in bars {
        let cells = if max_value == 0 {
            0
        } else {
            let scaled = (*value as usize * width + max_value as usize / 2) / max_value as usize;
            if *value > 0 { scaled.max(1) } else { 0 }
        };
        let _ = writeln!(
            out,
            "{:>lw$} │{} {}",
            label,
            "█".repeat(cells),
            value,
            lw = label_width
        );
    }
    out
}

/// The A / B / Result chart for one adder run.
pub fn outcome_chart(outcome: &AdderOutcome, width: usize) -> String {
    bar_chart(
        CHART_TITLE,
        &[
            ("A", u32::from(outcome.a)),
            ("B", u32::from(outcome.b)),
            ("Result", u32::from(outcome.sum_decimal)),
        ],
        width,
    )
}

/// Short explanation printed under the results.
pub fn how_it_works() -> &'static str {
    "How It Works\n\
     - Uses Toffoli (CCNOT) gates to generate carry.\n\
     - Uses CNOT gates for XOR (sum).\n\
     - Carry ripples from LSB to MSB.\n\
     - Final carry stored in C4.\n"
}
