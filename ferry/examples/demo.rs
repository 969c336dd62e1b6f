use std::env::temp_dir;

use ferry::{
    Config, Ferry,
    machine::{MigrationTarget, Workload},
    migration::VolumePolicy,
    system::{Credentials, MountPoint},
};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .init();

    let config = Config {
        store: Some(temp_dir().join("ferry-demo").join("store.json")),
        policy: VolumePolicy::allow_all(),
        ..Config::default()
    };
    let mut ferry = Ferry::new(config)?;

    let source = Workload::new(
        "192.168.1.1",
        Credentials::new("name", "pass", "sourcedomain"),
        vec![
            MountPoint::new("C:\\", 10),
            MountPoint::new("D:\\", 10),
            MountPoint::new("E:\\", 10),
        ],
    );
    let target = MigrationTarget::new(
        "aws",
        Credentials::new("cloudname", "cloudpass", "clouddomain"),
        Workload::new(
            "192.168.1.2",
            Credentials::new("targetname", "targetpass", "targetdomain"),
            vec![MountPoint::new("F:\\", 10), MountPoint::new("G:\\", 10)],
        ),
    )?;

    let mut migration = ferry.migration(vec![MountPoint::new("C:\\", 10)], source, target);
    ferry.run(&mut migration).await?;

    println!("{migration}");
    for record in ferry.store_mut().read().await? {
        println!("{:?} {}", record.kind(), record.ip());
    }

    Ok(())
}
