use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Person, Team};

/// Read-only lookup over the teams file. The engine references people by
/// username; this collaborator owns the team data.
#[derive(Debug, Clone)]
pub struct Directory {
  teams: Vec<Team>,
}

impl Directory {
  pub fn new(teams: Vec<Team>) -> Self {
    Self { teams }
  }

  pub fn load(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading teams file {}", path.display()))?;
    let teams: Vec<Team> =
      serde_json::from_str(&text).with_context(|| format!("parsing teams file {}", path.display()))?;
    tracing::info!(count = teams.len(), "loaded team directory");
    Ok(Self { teams })
  }

  pub fn teams(&self) -> &[Team] {
    &self.teams
  }

  /// First team the person belongs to, if any.
  pub fn team_of(&self, person: &Person) -> Option<&Team> {
    self
      .teams
      .iter()
      .find(|team| team.members.iter().any(|member| member.username == person.username))
  }

  pub fn team_named(&self, name: &str) -> Option<&Team> {
    self.teams.iter().find(|team| team.name == name)
  }

  /// Every known team, populated with only the members that appear among the
  /// given contributor usernames. Teams without contributors stay listed,
  /// with no members.
  pub fn teams_with(&self, usernames: &[String]) -> Vec<Team> {
    self
      .teams
      .iter()
      .map(|team| Team {
        name: team.name.clone(),
        members: team
          .members
          .iter()
          .filter(|member| usernames.contains(&member.username))
          .cloned()
          .collect(),
      })
      .collect()
  }
}
