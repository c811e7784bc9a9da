use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ofx_clip_host::{
    clip::{
        self,
        schema::{CLIP_DESCRIPTOR_SCHEMA, CLIP_INSTANCE_SCHEMA},
        ClipDescriptorSet, ClipInstance, ClipInstanceSet, ClipValues,
    },
    config::Config,
    error::ClipError,
    image::{
        schema::{IMAGE_BASE_SCHEMA, IMAGE_SCHEMA},
        Image, ImageGeometry, Rect,
    },
    ofx,
    property::{PropSpec, RawPointer},
};

#[derive(Parser)]
#[command(
    name = "ofx-clip-host",
    version,
    about = "Inspect the host side clip model of OpenFX image effects",
    long_about = "Prints the clip and image property schemas, runs component negotiation and shows the properties a plugin would see on live clip instances."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a property schema table
    Schema {
        #[arg(value_enum, default_value = "instance")]
        table: SchemaTable,
    },

    /// Pick the component layout a clip would deliver
    Negotiate {
        /// Layouts the clip supports, in preference order
        #[arg(short, long, value_delimiter = ',', required = true)]
        supported: Vec<String>,

        /// Layout the host asks for
        #[arg(short, long)]
        requested: String,
    },

    /// Instantiate Source and Output clips and print their properties
    Inspect {
        /// Layouts both clips support
        #[arg(short, long, value_delimiter = ',', default_value = ofx::IMAGE_COMPONENT_RGBA)]
        supported: Vec<String>,

        /// Only show this clip
        #[arg(long)]
        clip: Option<String>,

        /// Width of the sample output image
        #[arg(long, default_value_t = 1920)]
        width: i32,

        /// Height of the sample output image
        #[arg(long, default_value_t = 1080)]
        height: i32,
    },

    /// Write the default configuration to a file
    Defaults {
        /// Where to write the TOML file
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaTable {
    Clip,
    Instance,
    Image,
    Texture,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };
    config.validate()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.host.log_directive(cli.verbose)))
        .init();

    debug!("Starting ofx-clip-host v{}", env!("CARGO_PKG_VERSION"));
    match &cli.config {
        Some(path) => debug!("Loaded configuration from {:?}", path),
        None => debug!("Using default configuration"),
    }

    match cli.command {
        Command::Schema { table } => print_schema(table)?,
        Command::Negotiate { supported, requested } => {
            let chosen = clip::find_supported_comp(
                supported.as_slice(),
                &requested,
                ofx::is_chromatic_component,
            );
            println!("{}", chosen);
        }
        Command::Inspect {
            supported,
            clip,
            width,
            height,
        } => {
            let frame = Rect::new(0, 0, width, height);
            inspect(&config, &supported, clip.as_deref(), frame)?
        }
        Command::Defaults { output } => {
            Config::default().save_to_file(&output)?;
            info!("Default configuration written to {:?}", output);
        }
    }

    Ok(())
}

fn schema_rows(table: SchemaTable) -> Result<Vec<PropSpec>> {
    let rows = match table {
        SchemaTable::Clip => CLIP_DESCRIPTOR_SCHEMA.to_vec(),
        SchemaTable::Instance => CLIP_DESCRIPTOR_SCHEMA
            .iter()
            .chain(CLIP_INSTANCE_SCHEMA)
            .copied()
            .collect(),
        SchemaTable::Image => IMAGE_BASE_SCHEMA.iter().chain(IMAGE_SCHEMA).copied().collect(),
        SchemaTable::Texture => texture_rows()?,
    };
    Ok(rows)
}

#[cfg(feature = "opengl")]
fn texture_rows() -> Result<Vec<PropSpec>> {
    Ok(IMAGE_BASE_SCHEMA
        .iter()
        .chain(ofx_clip_host::image::schema::TEXTURE_SCHEMA)
        .copied()
        .collect())
}

#[cfg(not(feature = "opengl"))]
fn texture_rows() -> Result<Vec<PropSpec>> {
    anyhow::bail!("built without the opengl feature")
}

fn print_schema(table: SchemaTable) -> Result<()> {
    let rows = schema_rows(table)?;
    println!("{:<46} {:<8} {:>4}  {:<9} default", "name", "type", "dim", "read-only");
    for spec in rows {
        let dimension = if spec.is_variable() {
            "var".to_string()
        } else {
            spec.dimension.to_string()
        };
        println!(
            "{:<46} {:<8} {:>4}  {:<9} {:?}",
            spec.name,
            spec.prop_type.name(),
            dimension,
            spec.plugin_read_only,
            spec.default
        );
    }
    Ok(())
}

fn inspect(config: &Config, supported: &[String], only: Option<&str>, frame: Rect) -> Result<()> {
    let mut descriptors = ClipDescriptorSet::new();
    for name in [ofx::SOURCE_CLIP_NAME, ofx::OUTPUT_CLIP_NAME] {
        let descriptor = descriptors.define_clip(name);
        for components in supported {
            descriptor.add_supported_component(components)?;
        }
    }

    let clips = ClipInstanceSet::instantiate(None, &descriptors, |_| {
        Arc::new(config.clip.clone()) as Arc<dyn ClipValues>
    })?;

    // Stand in for a clip preferences pass
    for clip in clips.iter() {
        let components = clip.find_supported_comp(&config.clip.components);
        clip.set_components(&components);
        clip.set_pixel_depth(&config.clip.pixel_depth);
    }

    match only {
        Some(name) => {
            let clip = clips.get(name).ok_or_else(|| ClipError::NotFound {
                name: name.to_string(),
            })?;
            print_clip(clip)?;
        }
        None => {
            for clip in clips.iter() {
                print_clip(clip)?;
            }
        }
    }

    if let Some(output) = clips.output() {
        print_image_lifecycle(output, frame)?;
    }

    Ok(())
}

fn print_clip(clip: &ClipInstance) -> Result<()> {
    println!("[{}]", clip.name());
    for property in clip.props().iter() {
        let values = clip.props().get_values(property.name())?;
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let marker = if property.plugin_read_only() { " (ro)" } else { "" };
        println!("  {}{} = [{}]", property.name(), marker, rendered.join(", "));
    }
    println!();
    Ok(())
}

/// Build an image the way a render would and walk it through its references
fn print_image_lifecycle(clip: &ClipInstance, frame: Rect) -> Result<()> {
    let geometry = ImageGeometry {
        bounds: frame,
        rod: frame,
        unique_identifier: format!("{}-inspect", clip.name()),
        ..ImageGeometry::default()
    };
    let image = Image::with_data(clip, &geometry, RawPointer::null())?;

    println!("[image]");
    println!(
        "  {} {} {}x{}",
        image.components(),
        image.pixel_depth(),
        image.bounds().width(),
        image.bounds().height()
    );
    println!("  references = {}", image.add_reference()?);
    println!("  release -> {:?}", image.release_reference()?);
    println!("  release -> {:?}", image.release_reference()?);
    Ok(())
}
