use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identity of an agent as issued by the backend.
pub type AgentId = i64;

const DEFAULT_RANK: &str = "Sales Executive";

/// One agent row as supplied by the hierarchy query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord", rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: AgentId,
    pub display_name: String,
    pub rank: String,
    pub parent_id: Option<AgentId>,
}

impl AgentRecord {
    pub fn new(
        id: AgentId,
        display_name: impl Into<String>,
        rank: impl Into<String>,
        parent_id: Option<AgentId>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            rank: rank.into(),
            parent_id,
        }
    }
}

/// Accepts both the canonical field names and the backend's downline row
/// names (`agent_id`, `firstname`/`lastname`, `position`, `recruiter_id`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(alias = "agent_id", alias = "agentId")]
    id: AgentId,
    #[serde(default, alias = "display_name")]
    display_name: Option<String>,
    #[serde(default, alias = "first_name")]
    firstname: Option<String>,
    #[serde(default, alias = "last_name")]
    lastname: Option<String>,
    #[serde(default, alias = "position")]
    rank: Option<String>,
    #[serde(default, alias = "parent_id", alias = "recruiter_id", alias = "recruiterId")]
    parent_id: Option<AgentId>,
}

impl From<RawRecord> for AgentRecord {
    fn from(raw: RawRecord) -> Self {
        let display_name = match raw.display_name {
            Some(name) => name,
            None => {
                let parts: Vec<&str> = [raw.firstname.as_deref(), raw.lastname.as_deref()]
                    .into_iter()
                    .flatten()
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect();
                parts.join(" ")
            }
        };
        Self {
            id: raw.id,
            display_name,
            rank: raw.rank.unwrap_or_default(),
            parent_id: raw.parent_id,
        }
    }
}

/// A complete record set for one layout run: the viewing agent plus its
/// flat downline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyInput {
    #[serde(default)]
    pub root: Option<AgentRecord>,
    #[serde(default, alias = "downlines")]
    pub rows: Vec<AgentRecord>,
}

impl HierarchyInput {
    pub fn new(root: AgentRecord, rows: Vec<AgentRecord>) -> Self {
        Self {
            root: Some(root),
            rows,
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json(&raw)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Label shown under an agent's name. An empty rank or the generic `agent`
/// position (any case) is presented as the entry-level title; anything else,
/// whitespace included, is shown as given.
pub fn display_rank(rank: &str) -> &str {
    if rank.is_empty() || rank.eq_ignore_ascii_case("agent") {
        DEFAULT_RANK
    } else {
        rank
    }
}
