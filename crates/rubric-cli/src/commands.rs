//! Executes a parsed [`Command`] against the API and renders the result as
//! JSON.

use anyhow::{Context, Result};
use rubric_core::{
  ContextScope, LinkFilter, Merge, OutcomeGroup, OutcomesClient, Requester,
};
use serde_json::{Value, json};

use crate::args::{Command, GroupCommand, OutcomeCommand};

pub async fn run<R: Requester>(client: &OutcomesClient<R>, command: Command) -> Result<Value> {
  match command {
    Command::Outcome { action } => run_outcome(client, action).await,
    Command::Group { scope, action } => run_group(client, scope.scope(), action).await,
  }
}

async fn run_outcome<R: Requester>(
  client: &OutcomesClient<R>,
  action: OutcomeCommand,
) -> Result<Value> {
  match action {
    OutcomeCommand::Show { id } => {
      let outcome = client
        .outcome(id)
        .await
        .with_context(|| format!("fetching outcome {id}"))?;
      Ok(serde_json::to_value(outcome)?)
    }
    OutcomeCommand::Update { id, title, fields } => {
      let mut outcome = client
        .outcome(id)
        .await
        .with_context(|| format!("fetching outcome {id}"))?;
      let merge = client
        .update_outcome(&mut outcome, &fields.into_fields(title))
        .await
        .with_context(|| format!("updating outcome {id}"))?;
      Ok(json!({ "updated": merge.is_updated(), "outcome": outcome }))
    }
  }
}

async fn run_group<R: Requester>(
  client: &OutcomesClient<R>,
  scope: ContextScope,
  action: GroupCommand,
) -> Result<Value> {
  match action {
    GroupCommand::Root => {
      let group = client
        .root_outcome_group(scope)
        .await
        .with_context(|| format!("fetching root outcome group of {scope}"))?;
      Ok(serde_json::to_value(group)?)
    }
    GroupCommand::List => {
      let groups = client
        .outcome_groups(scope)?
        .collect_all()
        .await
        .with_context(|| format!("listing outcome groups of {scope}"))?;
      Ok(serde_json::to_value(groups)?)
    }
    GroupCommand::Links => {
      let links = client
        .outcome_group_links(scope)?
        .collect_all()
        .await
        .with_context(|| format!("listing outcome links of {scope}"))?;
      Ok(serde_json::to_value(links)?)
    }
    GroupCommand::Show { id } => {
      let group = fetch_group(client, scope, id).await?;
      Ok(serde_json::to_value(group)?)
    }
    GroupCommand::Update { id, title, fields } => {
      let mut group = fetch_group(client, scope, id).await?;
      let merge = client
        .update_group(&mut group, &fields.into_fields(title))
        .await
        .with_context(|| format!("updating outcome group {id}"))?;
      Ok(merge_report(merge, &group))
    }
    GroupCommand::Delete { id } => {
      let mut group = fetch_group(client, scope, id).await?;
      let merge = client
        .delete_group(&mut group)
        .await
        .with_context(|| format!("deleting outcome group {id}"))?;
      Ok(merge_report(merge, &group))
    }
    GroupCommand::Outcomes { id, full } => {
      let group = fetch_group(client, scope, id).await?;
      let filter = if full { LinkFilter::full() } else { LinkFilter::default() };
      let links = client
        .list_linked_outcomes(&group, &filter)?
        .collect_all()
        .await
        .with_context(|| format!("listing outcomes of group {id}"))?;
      if !full {
        return Ok(serde_json::to_value(links)?);
      }
      let mut outcomes = Vec::with_capacity(links.len());
      for link in &links {
        let outcome = client
          .get_outcome(link)
          .await
          .with_context(|| format!("fetching outcome {}", link.outcome.id))?;
        outcomes.push(outcome);
      }
      Ok(serde_json::to_value(outcomes)?)
    }
    GroupCommand::Link { id, outcome_id } => {
      let group = fetch_group(client, scope, id).await?;
      let link = client
        .link_existing(&group, outcome_id)
        .await
        .with_context(|| format!("linking outcome {outcome_id} into group {id}"))?;
      Ok(serde_json::to_value(link)?)
    }
    GroupCommand::LinkNew { id, title, fields } => {
      let group = fetch_group(client, scope, id).await?;
      let link = client
        .link_new(&group, &title, &fields.into_fields(None))
        .await
        .with_context(|| format!("creating outcome {title:?} in group {id}"))?;
      Ok(serde_json::to_value(link)?)
    }
    GroupCommand::Unlink { id, outcome_id } => {
      let mut group = fetch_group(client, scope, id).await?;
      let merge = client
        .unlink_outcome(&mut group, outcome_id)
        .await
        .with_context(|| format!("unlinking outcome {outcome_id} from group {id}"))?;
      Ok(merge_report(merge, &group))
    }
    GroupCommand::Subgroups { id } => {
      let group = fetch_group(client, scope, id).await?;
      let subgroups = client
        .list_subgroups(&group)
        .collect_all()
        .await
        .with_context(|| format!("listing subgroups of group {id}"))?;
      Ok(serde_json::to_value(subgroups)?)
    }
    GroupCommand::CreateSubgroup { id, title, fields } => {
      let group = fetch_group(client, scope, id).await?;
      let subgroup = client
        .create_subgroup(&group, &title, &fields.into_fields(None))
        .await
        .with_context(|| format!("creating subgroup {title:?} under group {id}"))?;
      Ok(serde_json::to_value(subgroup)?)
    }
    GroupCommand::Import { id, source_group_id } => {
      let group = fetch_group(client, scope, id).await?;
      let imported = client
        .import_outcome_group(&group, source_group_id)
        .await
        .with_context(|| format!("importing group {source_group_id} into group {id}"))?;
      Ok(serde_json::to_value(imported)?)
    }
  }
}

async fn fetch_group<R: Requester>(
  client: &OutcomesClient<R>,
  scope: ContextScope,
  id: u64,
) -> Result<OutcomeGroup> {
  client
    .outcome_group(scope, id)
    .await
    .with_context(|| format!("fetching outcome group {id} in {scope}"))
}

fn merge_report(merge: Merge<OutcomeGroup>, group: &OutcomeGroup) -> Value {
  json!({ "updated": merge.is_updated(), "group": group })
}

#[cfg(test)]
mod tests {
  use rubric_core::mock::MockRequester;
  use serde_json::json;

  use super::*;
  use crate::args::{GroupFieldArgs, ScopeArgs};

  fn group_doc(id: u64) -> Value {
    json!({ "id": id, "title": "Unit", "context_type": "Course", "context_id": 4 })
  }

  #[tokio::test]
  async fn create_subgroup_fetches_parent_then_posts() {
    let client = OutcomesClient::new(MockRequester::new());
    client
      .requester()
      .respond(group_doc(1))
      .respond(group_doc(2));

    let command = Command::Group {
      scope:  ScopeArgs {
        course:  Some(4),
        account: None,
      },
      action: GroupCommand::CreateSubgroup {
        id:     1,
        title:  "Week 1".into(),
        fields: GroupFieldArgs::default(),
      },
    };
    let out = run(&client, command).await.unwrap();
    assert_eq!(out["id"], json!(2));

    let requests = client.requester().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].endpoint.to_string(), "courses/4/outcome_groups/1");
    assert_eq!(
      requests[1].endpoint.to_string(),
      "courses/4/outcome_groups/1/subgroups"
    );
    assert_eq!(requests[1].params["title"], json!("Week 1"));
  }

  #[tokio::test]
  async fn unlink_reports_whether_the_group_changed() {
    let client = OutcomesClient::new(MockRequester::new());
    client
      .requester()
      .respond(group_doc(1))
      .respond(json!({ "deleted": true }));

    let command = Command::Group {
      scope:  ScopeArgs {
        course:  Some(4),
        account: None,
      },
      action: GroupCommand::Unlink {
        id:         1,
        outcome_id: 8,
      },
    };
    let out = run(&client, command).await.unwrap();
    assert_eq!(out["updated"], json!(false));
    assert_eq!(out["group"]["id"], json!(1));
  }

  #[tokio::test]
  async fn global_listing_is_refused() {
    let client = OutcomesClient::new(MockRequester::new());
    let command = Command::Group {
      scope:  ScopeArgs::default(),
      action: GroupCommand::List,
    };
    assert!(run(&client, command).await.is_err());
    assert_eq!(client.requester().request_count(), 0);
  }
}
