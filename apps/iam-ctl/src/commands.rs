use anyhow::Result;
use clap::{Args, Subcommand};
use organization_units::NewOrganizationUnit;
use serde::Serialize;

use crate::bootstrap::App;

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page size (clamped to the configured maximum)
    #[arg(long)]
    limit: Option<u64>,

    /// Number of records to skip
    #[arg(long)]
    offset: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum OuCommand {
    /// List root organization units
    List(PageArgs),

    /// Show one organization unit
    Get { id: String },

    /// Resolve a handle path such as `engineering/platform`
    Path { path: String },

    /// List the children of a unit, by id or by handle path
    Children {
        /// Unit id
        #[arg(conflicts_with = "path", required_unless_present = "path")]
        id: Option<String>,

        /// Handle path instead of an id
        #[arg(long)]
        path: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Create a unit in the mutable store
    Create {
        #[arg(long)]
        handle: String,

        #[arg(long)]
        name: String,

        /// Explicit id; generated when omitted
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        parent: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a unit from the mutable store
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommand {
    /// List layouts
    List(PageArgs),

    /// Show one layout
    Get { id: String },
}

/// # Errors
/// Serialization failures.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// # Errors
/// Whatever the organization units client rejects.
pub async fn run_ou(cmd: OuCommand, app: &App) -> Result<()> {
    let client = app.organization_units.client()?;
    match cmd {
        OuCommand::List(page) => print_json(&client.list_root_units(page.limit, page.offset).await?),
        OuCommand::Get { id } => print_json(&client.get_unit(&id).await?),
        OuCommand::Path { path } => print_json(&client.get_unit_by_path(&path).await?),
        OuCommand::Children { id, path, page } => {
            let children = match (id, path) {
                (_, Some(path)) => {
                    client
                        .list_children_by_path(&path, page.limit, page.offset)
                        .await?
                }
                (Some(id), None) => client.list_children(&id, page.limit, page.offset).await?,
                (None, None) => anyhow::bail!("either an id or --path is required"),
            };
            print_json(&children)
        }
        OuCommand::Create {
            handle,
            name,
            id,
            parent,
            description,
        } => {
            let created = client
                .create_unit(NewOrganizationUnit {
                    id,
                    handle,
                    name,
                    description,
                    parent,
                })
                .await?;
            print_json(&created)
        }
        OuCommand::Delete { id } => {
            client.delete_unit(&id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

/// # Errors
/// Whatever the layouts service rejects.
pub async fn run_layout(cmd: LayoutCommand, app: &App) -> Result<()> {
    let svc = app.layouts.service()?;
    match cmd {
        LayoutCommand::List(page) => print_json(&svc.list(page.limit, page.offset).await?),
        LayoutCommand::Get { id } => print_json(&svc.get(&id).await?),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        ou: OuCommand,
    }

    #[test]
    fn children_takes_an_id_or_a_path() {
        let by_id = Harness::try_parse_from(["t", "children", "ou-eng", "--limit", "5"]).unwrap();
        assert!(matches!(
            by_id.ou,
            OuCommand::Children { id: Some(ref id), path: None, page } if id == "ou-eng" && page.limit == Some(5)
        ));

        let by_path = Harness::try_parse_from(["t", "children", "--path", "engineering"]).unwrap();
        assert!(matches!(by_path.ou, OuCommand::Children { path: Some(_), .. }));

        assert!(Harness::try_parse_from(["t", "children"]).is_err());
        assert!(Harness::try_parse_from(["t", "children", "x", "--path", "y"]).is_err());
    }

    #[test]
    fn create_requires_handle_and_name() {
        assert!(Harness::try_parse_from(["t", "create", "--handle", "sales"]).is_err());
        let cmd = Harness::try_parse_from([
            "t", "create", "--handle", "sales", "--name", "Sales", "--parent", "ou-eng",
        ])
        .unwrap();
        assert!(matches!(
            cmd.ou,
            OuCommand::Create { ref parent, id: None, .. } if parent.as_deref() == Some("ou-eng")
        ));
    }
}
