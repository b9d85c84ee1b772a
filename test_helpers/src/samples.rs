//! Sample grid documents shared by tests.

/// Base configuration with cluster settings and no data structures.
pub const BASE_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hazelcast xmlns="http://www.hazelcast.com/schema/config">
    <group>
        <name>dev</name>
        <password>dev-pass</password>
    </group>
    <network>
        <port auto-increment="true">5701</port>
    </network>
    <properties>
        <property name="hazelcast.logging.type">slf4j</property>
    </properties>
</hazelcast>
"#;

/// Base configuration whose root has no children.
pub const EMPTY_BASE: &str = r#"<hazelcast/>"#;

/// Fragment contributing two maps.
pub const MAPS_FRAGMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hazelcast>
    <map name="tasks">
        <backup-count>2</backup-count>
        <time-to-live-seconds>300</time-to-live-seconds>
        <eviction-policy>LRU</eviction-policy>
    </map>
    <map name="users">
        <read-backup-data>true</read-backup-data>
    </map>
</hazelcast>
"#;

/// Fragment contributing one queue backed by a map.
pub const QUEUES_FRAGMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hazelcast>
    <queue name="jobs">
        <max-size-per-jvm>1000</max-size-per-jvm>
        <backing-map-ref>jobs-store</backing-map-ref>
    </queue>
</hazelcast>
"#;

/// Fragment that lists a map before a queue in the file.
pub const MIXED_FRAGMENT: &str = r#"<hazelcast>
    <map name="sessions"/>
    <topic name="events"><global-ordering-enabled>true</global-ordering-enabled></topic>
    <queue name="mail"/>
    <network><join/></network>
</hazelcast>
"#;

/// Content that is not XML at all.
pub const GARBAGE: &str = "this is definitely not a configuration document";
