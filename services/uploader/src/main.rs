//! Basin publication CLI.
//!
//! Submits an AWSM/SMRF topo image or model-results netCDF to a GeoServer
//! catalog: prepares a reduced copy of the artifact, moves it next to the
//! catalog's data root and creates the workspace/store/layers that are
//! missing.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use geoserver_client::{CatalogConfig, GsCatalog};
use publisher::{
    AssumeYes, Confirm, LocalCopy, NetcdfPrep, OnExists, PublishConfig, ScpTransfer, StdinConfirm,
    Transfer, UploadOutcome, UploadRequest, UploadType, Uploader,
};

use config::Credentials;

#[derive(Parser, Debug)]
#[command(name = "uploader")]
#[command(about = "Submits a lidar flight, AWSM/SMRF topo image, or AWSM modeling results to a geoserver")]
struct Args {
    /// Path to the netCDF to publish
    #[arg(short = 'f', long = "netcdf")]
    netcdf: PathBuf,

    /// Basin name, which is also the catalog workspace name
    #[arg(short, long)]
    basin: String,

    /// JSON file containing catalog credentials
    #[arg(short, long, default_value = "./geoserver.json")]
    credentials: PathBuf,

    /// Upload type: flight, topo, shapefile or modeled
    #[arg(short = 't', long = "type", default_value = "modeled")]
    upload_type: String,

    /// EPSG code to tag on when the artifact has no projection variable
    #[arg(short = 'e', long = "epsg")]
    projection: Option<u32>,

    /// Basin mask netCDF applied to modeled uploads
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long = "yes")]
    assume_yes: bool,

    /// Policy for an existing store: fail, skip or recreate
    #[arg(long, default_value = "fail")]
    on_exists: String,

    /// Scratch directory for prepared artifact copies
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let upload_type: UploadType = args.upload_type.parse().map_err(anyhow::Error::msg)?;
    let on_exists: OnExists = args.on_exists.parse().map_err(anyhow::Error::msg)?;

    let credentials = Credentials::from_file(&args.credentials)?;
    info!(url = %credentials.url, basin = %args.basin, upload_type = %upload_type, "Connecting to catalog");

    let catalog = GsCatalog::new(CatalogConfig {
        base_url: credentials.url.clone(),
        username: credentials.username.clone(),
        password: credentials.password.clone(),
    })?;

    let transfer: Box<dyn Transfer> = match &credentials.remote_host {
        Some(host) => Box::new(ScpTransfer::new(
            host.clone(),
            credentials.ssh_identity.clone(),
        )),
        None => Box::new(LocalCopy),
    };

    let confirm: Box<dyn Confirm> = if args.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    let mut publish_config = PublishConfig::new(credentials.data_root.clone());
    publish_config.on_exists = on_exists;
    if let Some(work_dir) = args.work_dir {
        publish_config.work_dir = work_dir;
    }

    let uploader = Uploader {
        catalog: &catalog,
        confirm: confirm.as_ref(),
        prep: &NetcdfPrep,
        transfer: transfer.as_ref(),
        config: &publish_config,
    };

    let request = UploadRequest {
        source: args.netcdf,
        basin: args.basin,
        upload_type,
        projection: args.projection,
        mask: args.mask,
    };

    match uploader.upload(&request).await? {
        UploadOutcome::Published {
            workspace,
            store,
            layers,
        } => {
            info!(
                workspace = %workspace,
                store = %store,
                layers = ?layers,
                "Publication finished"
            );
        }
        UploadOutcome::Declined => {
            info!("Not creating anything, stopping");
        }
        UploadOutcome::Unimplemented(upload_type) => {
            info!(upload_type = %upload_type, "Upload type is not developed yet");
        }
    }

    Ok(())
}
