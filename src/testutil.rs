// Shared builders for unit tests. Compiled only for `cargo test`.

use chrono::NaiveDateTime;

use crate::model::{Change, Person, Team};

pub fn ts(s: &str) -> NaiveDateTime {
  NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn person(username: &str) -> Person {
  Person {
    username: username.to_string(),
    name: {
      let mut chars = username.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
      }
    },
    end_date: None,
  }
}

pub fn departed(username: &str) -> Person {
  Person {
    end_date: Some("2022-12-31".to_string()),
    ..person(username)
  }
}

pub fn team(name: &str, members: Vec<Person>) -> Team {
  Team {
    name: name.to_string(),
    members,
  }
}

pub fn change(project: &str, owner: &str, reviewer: Option<&str>, submitted: &str) -> Change {
  let submitted = ts(submitted);
  Change {
    owner: person(owner),
    submitter: person("submit-bot"),
    code_review: reviewer.map(person),
    project: project.to_string(),
    branch: "master".to_string(),
    change_id: format!("I{owner}-{project}-{submitted}"),
    status: "MERGED".to_string(),
    created: submitted,
    updated: submitted,
    submitted,
    insertions: 1,
    deletions: 0,
    unresolved_comments: 0,
    id: 0,
  }
}
