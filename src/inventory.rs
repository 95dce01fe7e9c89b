use std::collections::{BTreeMap, HashSet};

use facet::Facet;

use crate::error::InventoryError;
use crate::provider::Provider;
use crate::ssh_config::{self, HostOptions};
use crate::status;

/// Passed to ssh for every host; not configurable.
pub const SSH_COMMON_ARGS: &str = "-o StrictHostKeyChecking=no -o UserKnownHostsFile=/dev/null";

/// Group holding every running machine.
pub const ALL_GROUP: &str = "vagrants";
/// Machine that must be up for the `minikube` group to be valid.
pub const MINIKUBE_HOST: &str = "minikube";

// ── data model ───────────────────────────────────────────

/// Connection variables for one host, keyed the way Ansible reads them.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct HostRecord {
    #[facet(rename = "ansible_host")]
    pub host_address: String,
    #[facet(rename = "ansible_port")]
    pub port: String,
    #[facet(rename = "ansible_user")]
    pub user: String,
    #[facet(rename = "ansible_ssh_private_key_file")]
    pub private_key_path: String,
    #[facet(rename = "ansible_ssh_common_args")]
    pub ssh_options: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Facet)]
pub struct Group {
    #[facet(skip_serializing_if = Option::is_none)]
    pub vars: Option<BTreeMap<String, String>>,
    pub hosts: Vec<String>,
    #[facet(skip_serializing_if = Vec::is_empty)]
    pub children: Vec<String>,
}

impl Group {
    pub fn with_hosts(hosts: Vec<String>) -> Self {
        Self {
            hosts,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Facet)]
pub struct Meta {
    pub hostvars: BTreeMap<String, HostRecord>,
}

/// Root of `--list` output.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct InventoryDocument {
    pub vagrants: Group,
    pub minikube: Group,
    #[facet(rename = "_meta")]
    pub meta: Meta,
}

impl HostRecord {
    /// Build a record from resolved ssh options, requiring port, user and
    /// at least one identity file. Only the first identity file is used.
    pub fn from_options(host: &str, opts: HostOptions) -> Result<Self, InventoryError> {
        let missing = |field: &str| InventoryError::MissingField {
            host: host.to_string(),
            field: field.to_string(),
        };

        let port = opts.port.ok_or_else(|| missing("Port"))?;
        let user = opts.user.ok_or_else(|| missing("User"))?;
        let private_key_path = opts
            .identity_files
            .into_iter()
            .next()
            .ok_or_else(|| missing("IdentityFile"))?;

        if opts.hostname.is_empty() {
            return Err(missing("HostName"));
        }

        Ok(Self {
            host_address: opts.hostname,
            port,
            user,
            private_key_path,
            ssh_options: SSH_COMMON_ARGS.to_string(),
        })
    }
}

// ── operations ───────────────────────────────────────────

/// Names of running machines in the order the provider reports them.
pub async fn running_hosts<P: Provider>(provider: &P) -> Result<Vec<String>, InventoryError> {
    let output = provider.status().await?;
    let hosts = status::running_hosts(&output)?;
    tracing::debug!(count = hosts.len(), ?hosts, "running machines");
    Ok(hosts)
}

/// Resolve the ssh connection details for one machine.
pub async fn host_details<P: Provider>(
    provider: &P,
    name: &str,
) -> Result<HostRecord, InventoryError> {
    if name.trim().is_empty() {
        return Err(InventoryError::Validation {
            message: "host name must not be empty".into(),
        });
    }

    let text = provider.ssh_config(name).await?;
    let config = ssh_config::parse(&text)?;
    let opts = config.lookup(name);
    if opts.identity_files.len() > 1 {
        tracing::debug!(host = %name, count = opts.identity_files.len(), "using first identity file");
    }
    let record = HostRecord::from_options(name, opts)?;
    tracing::info!(host = %name, address = %record.host_address, port = %record.port, "resolved host");
    Ok(record)
}

/// Fail unless every member of `group` is among `all`.
pub fn ensure_subset(group_name: &str, group: &Group, all: &[String]) -> Result<(), InventoryError> {
    let known: HashSet<&str> = all.iter().map(String::as_str).collect();
    let missing: Vec<&str> = group
        .hosts
        .iter()
        .map(String::as_str)
        .filter(|h| !known.contains(h))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(InventoryError::Validation {
        message: format!(
            "group '{group_name}' references {missing:?}, which are not among running hosts {all:?}"
        ),
    })
}

/// Assemble the full inventory. The group invariant is checked before any
/// host is resolved.
pub async fn build_list<P: Provider>(provider: &P) -> Result<InventoryDocument, InventoryError> {
    let vagrants = Group::with_hosts(running_hosts(provider).await?);
    let minikube = Group::with_hosts(vec![MINIKUBE_HOST.to_string()]);
    ensure_subset(MINIKUBE_HOST, &minikube, &vagrants.hosts)?;

    let mut hostvars = BTreeMap::new();
    for name in &vagrants.hosts {
        let record = host_details(provider, name).await?;
        hostvars.insert(name.clone(), record);
    }

    Ok(InventoryDocument {
        vagrants,
        minikube,
        meta: Meta { hostvars },
    })
}

/// Serialize a document for stdout.
pub fn to_json<'a, T: Facet<'a>>(value: &T, pretty: bool) -> Result<String, InventoryError> {
    let json = if pretty {
        facet_json::to_string_pretty(value)
    } else {
        facet_json::to_string(value)
    };
    json.map_err(|e| InventoryError::Serialize {
        message: e.to_string(),
    })
}
