//! Parser for `vagrant status --machine-readable`.
//!
//! Each line is `timestamp,target,type,data...`. Commas inside a field are
//! written as `%!(VAGRANT_COMMA)`, and embedded newlines as `\n`.

use crate::error::InventoryError;

const COMMA_ESCAPE: &str = "%!(VAGRANT_COMMA)";

/// One machine-readable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub timestamp: String,
    pub target: String,
    pub kind: String,
    pub data: Vec<String>,
}

fn unescape(field: &str) -> String {
    field
        .replace(COMMA_ESCAPE, ",")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
}

/// Parse a single non-blank line.
pub fn parse_line(line: &str) -> Result<StatusRecord, InventoryError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return Err(InventoryError::StatusParse {
            line: line.to_string(),
            message: format!("expected at least 4 fields, got {}", fields.len()),
        });
    }
    Ok(StatusRecord {
        timestamp: fields[0].to_string(),
        target: unescape(fields[1]),
        kind: unescape(fields[2]),
        data: fields[3..].iter().map(|f| unescape(f)).collect(),
    })
}

/// Parse the full output, skipping blank lines.
pub fn parse_records(output: &str) -> Result<Vec<StatusRecord>, InventoryError> {
    output
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Names of machines whose `state` is `running`, distinct, in first-seen order.
pub fn running_hosts(output: &str) -> Result<Vec<String>, InventoryError> {
    let mut hosts: Vec<String> = Vec::new();
    for record in parse_records(output)? {
        if record.target.is_empty() || record.kind != "state" {
            continue;
        }
        if record.data.first().map(String::as_str) != Some("running") {
            continue;
        }
        if !hosts.contains(&record.target) {
            hosts.push(record.target);
        }
    }
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1700000000,minikube,metadata,provider,virtualbox
1700000000,other,metadata,provider,virtualbox
1700000001,minikube,provider-name,virtualbox
1700000001,minikube,state,running
1700000001,minikube,state-human-short,running
1700000001,other,state,poweroff
1700000001,other,state-human-short,poweroff
1700000001,,ui,info,Current machine states:\\n\\nminikube%!(VAGRANT_COMMA) running
";

    #[test]
    fn running_filters_out_other_states() {
        let hosts = running_hosts("1,minikube,state,running\n1,other,state,poweroff\n").unwrap();
        assert_eq!(hosts, vec!["minikube"]);
    }

    #[test]
    fn running_from_full_output() {
        assert_eq!(running_hosts(SAMPLE).unwrap(), vec!["minikube"]);
    }

    #[test]
    fn running_keeps_first_seen_order_without_duplicates() {
        let out = "1,b,state,running\n1,a,state,running\n2,b,state,running\n";
        assert_eq!(running_hosts(out).unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn running_ignores_human_short_state() {
        let out = "1,web,state-human-short,running\n";
        assert!(running_hosts(out).unwrap().is_empty());
    }

    #[test]
    fn empty_output_means_no_hosts() {
        assert!(running_hosts("").unwrap().is_empty());
        assert!(running_hosts("\n\n").unwrap().is_empty());
    }

    #[test]
    fn short_line_is_a_parse_error() {
        let err = running_hosts("1,minikube,state\n").unwrap_err();
        assert!(matches!(err, InventoryError::StatusParse { .. }));
    }

    #[test]
    fn parse_line_unescapes_fields() {
        let record = parse_line("1,,ui,info,a%!(VAGRANT_COMMA) b\\nc").unwrap();
        assert_eq!(record.target, "");
        assert_eq!(record.kind, "ui");
        assert_eq!(record.data, vec!["info", "a, b\nc"]);
    }

    #[test]
    fn parse_records_handles_crlf() {
        let records = parse_records("1,web,state,running\r\n").unwrap();
        assert_eq!(records[0].data, vec!["running"]);
    }
}
