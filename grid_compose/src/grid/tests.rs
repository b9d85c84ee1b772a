//! Tests for mapping grid documents onto `GridConfig`.

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::samples;

use super::*;
use crate::tree::Document;

fn map(xml: &str) -> ComposeResult<GridConfig> {
    let document = Document::parse_str(xml).map_err(|err| ComposeError::xml("<test>", err))?;
    GridConfigMapper::default().map(document.root())
}

#[fixture]
fn full_config() -> Result<GridConfig> {
    Ok(map(
        r#"<hazelcast>
            <group><name>dev</name><password>dev-pass</password></group>
            <network><port auto-increment="true">5701</port></network>
            <properties>
                <property name="hazelcast.logging.type">slf4j</property>
                <property>orphan</property>
            </properties>
            <map name="tasks">
                <backup-count>2</backup-count>
                <time-to-live-seconds>300</time-to-live-seconds>
                <eviction-policy>LRU</eviction-policy>
                <read-backup-data>true</read-backup-data>
            </map>
            <map name="default"><backup-count>1</backup-count></map>
            <queue name="jobs">
                <max-size-per-jvm>1000</max-size-per-jvm>
                <backing-map-ref>jobs-store</backing-map-ref>
            </queue>
            <multimap name="tags"><value-collection-type>SET</value-collection-type></multimap>
            <topic name="events"><global-ordering-enabled>true</global-ordering-enabled></topic>
            <semaphore name="slots"><initial-permits>3</initial-permits></semaphore>
            <listeners/>
        </hazelcast>"#,
    )?)
}

#[rstest]
fn maps_every_structure_kind(full_config: Result<GridConfig>) -> Result<()> {
    let config = full_config?;
    let tasks = config.map_config("tasks").context("tasks map")?;
    ensure!(tasks.backup_count == Some(2), "{tasks:?}");
    ensure!(tasks.time_to_live_seconds == Some(300), "{tasks:?}");
    ensure!(tasks.eviction_policy == Some(EvictionPolicy::Lru), "{tasks:?}");
    ensure!(tasks.read_backup_data == Some(true), "{tasks:?}");

    let jobs = config.queue_config("jobs").context("jobs queue")?;
    ensure!(jobs.max_size_per_jvm == Some(1000), "{jobs:?}");
    ensure!(jobs.backing_map_ref.as_deref() == Some("jobs-store"), "{jobs:?}");

    let tags = config.multimap_config("tags").context("tags multimap")?;
    ensure!(tags.value_collection_type == Some(ValueCollectionType::Set));
    let events = config.topic_config("events").context("events topic")?;
    ensure!(events.global_ordering_enabled == Some(true));
    let slots = config.semaphore_config("slots").context("slots semaphore")?;
    ensure!(slots.initial_permits == Some(3));
    Ok(())
}

#[rstest]
fn maps_group_properties_and_other_sections(full_config: Result<GridConfig>) -> Result<()> {
    let config = full_config?;
    ensure!(config.group().name.as_deref() == Some("dev"));
    ensure!(config.group().password.as_deref() == Some("dev-pass"));
    ensure!(config.property("hazelcast.logging.type") == Some("slf4j"));
    ensure!(config.properties().len() == 1, "unnamed properties are ignored");
    ensure!(
        config.section("network") == Some(&json!({"port": {"auto-increment": "true", "$text": "5701"}})),
        "unexpected network section {:?}",
        config.section("network")
    );
    ensure!(config.section("listeners") == Some(&serde_json::Value::Null));
    Ok(())
}

#[rstest]
fn map_lookup_falls_back_to_default(full_config: Result<GridConfig>) -> Result<()> {
    let config = full_config?;
    let cache = config.map_config_or_default("cache");
    ensure!(cache.name == "cache" && cache.backup_count == Some(1), "{cache:?}");
    let tasks = config.map_config_or_default("tasks");
    ensure!(tasks.backup_count == Some(2), "{tasks:?}");
    ensure!(
        GridConfig::default().map_config_or_default("cache") == MapConfig::named("cache"),
        "empty configurations yield an unconfigured map"
    );
    Ok(())
}

#[rstest]
fn later_declaration_replaces_earlier_one() -> Result<()> {
    let config = map(
        r#"<hazelcast>
            <map name="tasks"><backup-count>1</backup-count></map>
            <map name="tasks"><backup-count>3</backup-count></map>
        </hazelcast>"#,
    )?;
    ensure!(config.maps().len() == 1);
    ensure!(config.map_config("tasks").and_then(|m| m.backup_count) == Some(3));
    Ok(())
}

#[rstest]
fn unnamed_structures_use_the_default_name() -> Result<()> {
    let config = map("<hazelcast><queue/></hazelcast>")?;
    ensure!(config.structure_names(StructureKind::Queue) == vec![DEFAULT_STRUCTURE_NAME]);
    Ok(())
}

#[rstest]
#[case::self_closing("<hazelcast><map/><group/></hazelcast>")]
#[case::open_and_close("<hazelcast><map></map><group>  </group></hazelcast>")]
fn empty_elements_map_to_defaults(#[case] xml: &str) -> Result<()> {
    let config = map(xml)?;
    ensure!(
        config.map_config(DEFAULT_STRUCTURE_NAME) == Some(&MapConfig::named(DEFAULT_STRUCTURE_NAME)),
        "{config:?}"
    );
    ensure!(config.group() == &GroupConfig::default(), "{config:?}");
    Ok(())
}

#[rstest]
fn base_sample_has_no_structures() -> Result<()> {
    let config = map(samples::BASE_CONFIG)?;
    for kind in StructureKind::ALL {
        ensure!(config.structure_names(kind).is_empty(), "unexpected {kind} entries");
    }
    ensure!(config.xml_config().is_none(), "the mapper never sets the raw text");
    Ok(())
}

#[rstest]
#[case::wrong_root("<config><map name=\"a\"/></config>", "config")]
#[case::bad_number("<hazelcast><map name=\"a\"><backup-count>two</backup-count></map></hazelcast>", "map")]
#[case::bad_policy("<hazelcast><map name=\"a\"><eviction-policy>RANDOM</eviction-policy></map></hazelcast>", "map")]
fn rejects_documents_that_do_not_fit(#[case] xml: &str, #[case] expected: &str) {
    let err = map(xml).expect_err("mapping should fail");
    match err.as_ref() {
        ComposeError::Mapping { element, .. } => assert_eq!(element, expected),
        other => panic!("expected mapping error, got {other:?}"),
    }
}

#[rstest]
fn custom_root_name_is_honoured() -> Result<()> {
    let document = Document::parse_str("<grid><topic name=\"news\"/></grid>")?;
    let mapper = GridConfigMapper::with_root("grid");
    ensure!(mapper.root_name() == "grid");
    ensure!(GridConfigMapper::default().root_name() == GRID_ROOT);
    let config = mapper.map(document.root())?;
    ensure!(config.topic_config("news").is_some());
    Ok(())
}

#[rstest]
fn stores_raw_text() {
    let mut config = GridConfig::default();
    config.set_xml_config("<hazelcast/>".to_owned());
    assert_eq!(config.xml_config(), Some("<hazelcast/>"));
}
