/// Types offered in the column editor.
pub const DATA_TYPES: [&str; 10] = [
    "VARCHAR(100)",
    "VARCHAR(255)",
    "TEXT",
    "INTEGER",
    "BIGINT",
    "DECIMAL(10,2)",
    "BOOLEAN",
    "DATE",
    "TIMESTAMP",
    "SERIAL",
];

/// Naming heuristics in precedence order; the first rule with a matching
/// fragment decides the type.
const RULES: [(&[&str], &str); 6] = [
    (&["id"], "VARCHAR(100)"),
    (&["count", "number", "score", "age"], "INTEGER"),
    (&["is_", "has_", "enable", "active", "flag"], "BOOLEAN"),
    (
        &["date", "time", "created", "modified", "timestamp"],
        "TIMESTAMP",
    ),
    (&["description", "comment", "note", "detail"], "TEXT"),
    (&["amount", "price", "cost", "value"], "DECIMAL(10,2)"),
];

const FALLBACK_TYPE: &str = "VARCHAR(255)";

/// Proposes an SQL column type for a parameter from its name alone.
pub fn infer_data_type(name: &str) -> &'static str {
    let name = name.to_ascii_lowercase();
    RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| name.contains(f)))
        .map(|(_, data_type)| *data_type)
        .unwrap_or(FALLBACK_TYPE)
}

/// Turns a parameter name into a column identifier: lowercase, runs of
/// anything but `[a-z0-9]` collapse to one `_`, and a leading digit gets a
/// `col_` prefix.
pub fn normalize_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_underscore = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_underscore && !out.is_empty() {
                out.push('_');
            }
            pending_underscore = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_underscore = true;
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "col_");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_examples() {
        assert_eq!(infer_data_type("patient_id"), "VARCHAR(100)");
        assert_eq!(infer_data_type("visit_count"), "INTEGER");
        assert_eq!(infer_data_type("is_active"), "BOOLEAN");
        assert_eq!(infer_data_type("created_at"), "TIMESTAMP");
        assert_eq!(infer_data_type("notes"), "TEXT");
        assert_eq!(infer_data_type("total_price"), "DECIMAL(10,2)");
        assert_eq!(infer_data_type("random_field"), "VARCHAR(255)");
    }

    #[test]
    fn first_rule_wins() {
        // "id" is checked before the counting words.
        assert_eq!(infer_data_type("order_id_count"), "VARCHAR(100)");
        assert_eq!(infer_data_type("Patient_Age"), "INTEGER");
    }

    #[test]
    fn column_names_are_normalized() {
        assert_eq!(normalize_column_name("Total Price (EUR)"), "total_price_eur");
        assert_eq!(normalize_column_name("  invoice--number "), "invoice_number");
        assert_eq!(normalize_column_name("2nd_address"), "col_2nd_address");
        assert_eq!(normalize_column_name("already_ok"), "already_ok");
    }
}
