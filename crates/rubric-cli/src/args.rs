//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rubric_core::{CalculationMethod, ContextScope, GroupFields, OutcomeFields};

// ─── Top level ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rubric", version, about = "Manage LMS outcomes and outcome groups")]
pub struct Cli {
  /// Path to a TOML config file (base_url, access_token, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Base URL of the LMS instance, e.g. https://lms.example.com.
  #[arg(long)]
  pub url: Option<String>,

  /// API access token.
  #[arg(long)]
  pub token: Option<String>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Work with individual outcomes.
  Outcome {
    #[command(subcommand)]
    action: OutcomeCommand,
  },
  /// Work with outcome groups in a course, an account, or the global scope.
  Group {
    #[command(flatten)]
    scope:  ScopeArgs,
    #[command(subcommand)]
    action: GroupCommand,
  },
}

// ─── Scope ────────────────────────────────────────────────────────────────────

/// `--course` / `--account`; neither means the global scope.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ScopeArgs {
  /// Course the groups belong to.
  #[arg(long, global = true, conflicts_with = "account")]
  pub course:  Option<u64>,
  /// Account the groups belong to.
  #[arg(long, global = true)]
  pub account: Option<u64>,
}

impl ScopeArgs {
  pub fn scope(&self) -> ContextScope {
    match (self.course, self.account) {
      (Some(id), _) => ContextScope::Course(id),
      (None, Some(id)) => ContextScope::Account(id),
      (None, None) => ContextScope::Global,
    }
  }
}

// ─── Outcomes ─────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum OutcomeCommand {
  /// Show one outcome.
  Show { id: u64 },
  /// Update an outcome's fields.
  Update {
    id:     u64,
    #[arg(long)]
    title:  Option<String>,
    #[command(flatten)]
    fields: OutcomeFieldArgs,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CalculationArg {
  DecayingAverage,
  NMastery,
  Latest,
  Highest,
  Average,
}

impl From<CalculationArg> for CalculationMethod {
  fn from(arg: CalculationArg) -> Self {
    match arg {
      CalculationArg::DecayingAverage => Self::DecayingAverage,
      CalculationArg::NMastery => Self::NMastery,
      CalculationArg::Latest => Self::Latest,
      CalculationArg::Highest => Self::Highest,
      CalculationArg::Average => Self::Average,
    }
  }
}

/// Optional outcome fields shared by `update` and `link-new`.
#[derive(Args, Debug, Default)]
pub struct OutcomeFieldArgs {
  #[arg(long)]
  pub display_name:       Option<String>,
  #[arg(long)]
  pub description:        Option<String>,
  #[arg(long)]
  pub vendor_guid:        Option<String>,
  #[arg(long)]
  pub mastery_points:     Option<f64>,
  /// A rating level as `DESCRIPTION=POINTS`; repeat for each level.
  #[arg(long = "rating", value_name = "DESCRIPTION=POINTS", value_parser = parse_rating)]
  pub ratings:            Vec<(String, f64)>,
  #[arg(long, value_enum)]
  pub calculation_method: Option<CalculationArg>,
  #[arg(long, requires = "calculation_method")]
  pub calculation_int:    Option<u32>,
}

impl OutcomeFieldArgs {
  pub fn into_fields(self, title: Option<String>) -> OutcomeFields {
    let mut fields = OutcomeFields {
      title,
      display_name: self.display_name,
      description: self.description,
      vendor_guid: self.vendor_guid,
      mastery_points: self.mastery_points,
      ..OutcomeFields::default()
    };
    for (description, points) in self.ratings {
      fields = fields.rating(description, points);
    }
    if let Some(method) = self.calculation_method {
      fields = fields.calculation(method.into(), self.calculation_int);
    }
    fields
  }
}

fn parse_rating(raw: &str) -> Result<(String, f64), String> {
  let (description, points) = raw
    .rsplit_once('=')
    .ok_or_else(|| format!("expected DESCRIPTION=POINTS, got {raw:?}"))?;
  let points = points
    .trim()
    .parse()
    .map_err(|e| format!("invalid points in {raw:?}: {e}"))?;
  Ok((description.trim().to_string(), points))
}

// ─── Groups ───────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
  /// Show the root outcome group of the scope.
  Root,
  /// List every outcome group in a course or account.
  List,
  /// List every outcome link in a course or account.
  Links,
  /// Show one group.
  Show { id: u64 },
  /// Update a group's fields.
  Update {
    id:     u64,
    #[arg(long)]
    title:  Option<String>,
    #[command(flatten)]
    fields: GroupFieldArgs,
  },
  /// Delete a group.
  Delete { id: u64 },
  /// List the outcomes linked into a group.
  Outcomes {
    id:   u64,
    /// Fetch the full definition of every linked outcome.
    #[arg(long)]
    full: bool,
  },
  /// Link an existing outcome into a group.
  Link { id: u64, outcome_id: u64 },
  /// Create a new outcome and link it into a group.
  LinkNew {
    id:     u64,
    #[arg(long)]
    title:  String,
    #[command(flatten)]
    fields: OutcomeFieldArgs,
  },
  /// Remove an outcome from a group.
  Unlink { id: u64, outcome_id: u64 },
  /// List a group's subgroups.
  Subgroups { id: u64 },
  /// Create a subgroup.
  CreateSubgroup {
    id:     u64,
    #[arg(long)]
    title:  String,
    #[command(flatten)]
    fields: GroupFieldArgs,
  },
  /// Import another group as a subgroup.
  Import { id: u64, source_group_id: u64 },
}

/// Optional group fields shared by `update` and `create-subgroup`.
#[derive(Args, Debug, Default)]
pub struct GroupFieldArgs {
  #[arg(long)]
  pub description: Option<String>,
  #[arg(long)]
  pub vendor_guid: Option<String>,
  /// Move the group under another parent group.
  #[arg(long)]
  pub parent:      Option<u64>,
}

impl GroupFieldArgs {
  pub fn into_fields(self, title: Option<String>) -> GroupFields {
    GroupFields {
      title,
      description: self.description,
      vendor_guid: self.vendor_guid,
      parent_outcome_group_id: self.parent,
    }
  }
}
