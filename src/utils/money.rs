/// Renders an amount in minor currency units for display, e.g. `7600` as
/// `"$76.00"`. Only used for logs and human-facing messages; arithmetic on
/// amounts always stays in integer cents.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
