//! End-to-end runs of the `grid-compose` pipeline.

use anyhow::{Context, Result, ensure};
use clap::Parser;
use grid_compose::ComposeError;
use grid_compose_cli::cli::Args;
use grid_compose_cli::error::CliError;
use grid_compose_cli::run;
use rstest::{fixture, rstest};
use test_helpers::fragments::FragmentDir;
use test_helpers::samples;

struct Workspace {
    dir: FragmentDir,
}

impl Workspace {
    fn args(&self, extra: &[&str]) -> Result<Args> {
        let base = self.dir.path().join("hazelcast.xml");
        let fragments = self.dir.path().join("conf.d");
        let mut argv = vec![
            "grid-compose".to_owned(),
            "--base".to_owned(),
            base.into_string(),
            "--fragments".to_owned(),
            fragments.into_string(),
        ];
        argv.extend(extra.iter().map(|arg| (*arg).to_owned()));
        Ok(Args::try_parse_from(argv)?)
    }
}

#[fixture]
fn workspace() -> Result<Workspace> {
    let dir = FragmentDir::new()?;
    dir.write("hazelcast.xml", samples::BASE_CONFIG)?;
    dir.create_subdir("conf.d")?;
    dir.write("conf.d/maps.xml", samples::MAPS_FRAGMENT)?;
    dir.write("conf.d/queues.xml", samples::QUEUES_FRAGMENT)?;
    Ok(Workspace { dir })
}

#[rstest]
fn writes_the_composite_xml(workspace: Result<Workspace>) -> Result<()> {
    let workspace = workspace?;
    let output = workspace.dir.path().join("composite.xml");
    run(&workspace.args(&["--output", output.as_str()])?)?;
    let xml = std::fs::read_to_string(&output).context("read composite")?;
    ensure!(xml.starts_with("<?xml"), "{xml}");
    ensure!(xml.contains(r#"<map name="tasks">"#), "{xml}");
    ensure!(xml.contains(r#"<queue name="jobs">"#), "{xml}");
    ensure!(xml.contains("<name>dev</name>"), "{xml}");
    Ok(())
}

#[rstest]
fn writes_a_summary(workspace: Result<Workspace>) -> Result<()> {
    let workspace = workspace?;
    let output = workspace.dir.path().join("summary.json");
    run(&workspace.args(&["--summary", "--output", output.as_str()])?)?;
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).context("read summary")?)?;
    ensure!(summary["structures"]["queue"] == serde_json::json!(["jobs"]), "{summary}");
    Ok(())
}

#[rstest]
fn suffix_flag_changes_discovery(workspace: Result<Workspace>) -> Result<()> {
    let workspace = workspace?;
    let output = workspace.dir.path().join("summary.json");
    run(&workspace.args(&["--suffix", ".frag", "--summary", "-o", output.as_str()])?)?;
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).context("read summary")?)?;
    ensure!(summary["structures"]["map"] == serde_json::json!([]), "{summary}");
    Ok(())
}

#[rstest]
fn broken_fragment_fails_the_run(workspace: Result<Workspace>) -> Result<()> {
    let workspace = workspace?;
    workspace.dir.write("conf.d/broken.xml", samples::GARBAGE)?;
    let output = workspace.dir.path().join("composite.xml");
    let err = run(&workspace.args(&["-o", output.as_str()])?).expect_err("run should fail");
    ensure!(
        matches!(&err, CliError::Compose(inner) if matches!(inner.as_ref(), ComposeError::Fragment { .. })),
        "{err:?}"
    );
    ensure!(!output.exists(), "nothing is written on failure");
    Ok(())
}
