//! Minimal OpenSSH client config reader.
//!
//! Handles `Host` blocks with wildcard and negated patterns, case-insensitive
//! keywords, `=` separators and quoted values. `Match` blocks are skipped.

use crate::error::InventoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    patterns: Vec<String>,
    options: Vec<(String, String)>,
}

impl Block {
    fn matches(&self, host: &str) -> bool {
        let mut matched = false;
        for pattern in &self.patterns {
            if let Some(negated) = pattern.strip_prefix('!') {
                if glob_match(negated, host) {
                    return false;
                }
            } else if glob_match(pattern, host) {
                matched = true;
            }
        }
        matched
    }
}

/// Parsed config: blocks in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshConfig {
    blocks: Vec<Block>,
}

/// Options resolved for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOptions {
    pub hostname: String,
    pub port: Option<String>,
    pub user: Option<String>,
    pub identity_files: Vec<String>,
}

/// `*` matches any run of characters, `?` exactly one.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Split `Keyword value`, `Keyword=value` or `Keyword = value`.
fn split_keyword(line: &str) -> Option<(&str, &str)> {
    let end = line.find(|c: char| c.is_whitespace() || c == '=')?;
    let (keyword, rest) = line.split_at(end);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest).trim();
    Some((keyword, rest))
}

pub fn parse(text: &str) -> Result<SshConfig, InventoryError> {
    let mut blocks = vec![Block {
        patterns: vec!["*".into()],
        options: Vec::new(),
    }];
    let mut in_match = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((keyword, value)) = split_keyword(line) else {
            return Err(InventoryError::SshConfigParse {
                line_no: idx + 1,
                message: format!("'{line}' has no value"),
            });
        };
        if value.is_empty() {
            return Err(InventoryError::SshConfigParse {
                line_no: idx + 1,
                message: format!("'{keyword}' has no value"),
            });
        }

        let keyword = keyword.to_ascii_lowercase();
        match keyword.as_str() {
            "host" => {
                in_match = false;
                blocks.push(Block {
                    patterns: value
                        .split_whitespace()
                        .map(|p| unquote(p).to_string())
                        .collect(),
                    options: Vec::new(),
                });
            }
            "match" => {
                tracing::debug!(line = idx + 1, "skipping Match block");
                in_match = true;
            }
            _ if in_match => {}
            _ => {
                if let Some(block) = blocks.last_mut() {
                    block.options.push((keyword, unquote(value).to_string()));
                }
            }
        }
    }

    Ok(SshConfig { blocks })
}

impl SshConfig {
    /// Resolve options for `host`. The first value seen for a keyword wins,
    /// except `IdentityFile`, which collects every value in order.
    pub fn lookup(&self, host: &str) -> HostOptions {
        let mut hostname: Option<String> = None;
        let mut opts = HostOptions::default();

        for block in self.blocks.iter().filter(|b| b.matches(host)) {
            for (key, value) in &block.options {
                match key.as_str() {
                    "hostname" if hostname.is_none() => hostname = Some(value.clone()),
                    "port" if opts.port.is_none() => opts.port = Some(value.clone()),
                    "user" if opts.user.is_none() => opts.user = Some(value.clone()),
                    "identityfile" => opts.identity_files.push(value.clone()),
                    _ => {}
                }
            }
        }

        opts.hostname = match hostname {
            Some(h) => h.replace("%h", host),
            None => host.to_string(),
        };
        opts
    }
}
