use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ini_doc::{Document, Entry, TextEncoding};

#[derive(Parser)]
#[command(name = "inidoc")]
#[command(
	author,
	version,
	about = "Read and edit INI-style configuration files"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Character encoding of the config file
	#[arg(long, global = true, value_enum, default_value_t = EncodingArg::Utf8)]
	encoding: EncodingArg,
}

#[derive(Subcommand)]
enum Commands {
	/// Print one entry's value
	Get {
		file: PathBuf,
		section: String,
		entry: String,

		/// Convert the value before printing
		#[arg(long = "as", value_enum, default_value_t = ValueKind::Text)]
		kind: ValueKind,
	},
	/// Add an entry, failing if it already exists
	Add {
		file: PathBuf,
		section: String,
		entry: String,
		value: String,
	},
	/// Set an entry's value, creating it if missing
	Set {
		file: PathBuf,
		section: String,
		entry: String,
		value: String,
	},
	/// Delete a whole section, or one entry from it
	Delete {
		file: PathBuf,
		section: String,
		entry: Option<String>,
	},
	/// List sections with their entry counts
	Sections { file: PathBuf },
	/// Print the file in canonical form
	Render { file: PathBuf },
	/// Write a sample config to PATH
	Demo { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
	Utf8,
	Utf16le,
	Utf16be,
	Latin1,
}

impl From<EncodingArg> for TextEncoding {
	fn from(arg: EncodingArg) -> Self {
		match arg {
			EncodingArg::Utf8 => TextEncoding::Utf8,
			EncodingArg::Utf16le => TextEncoding::Utf16Le,
			EncodingArg::Utf16be => TextEncoding::Utf16Be,
			EncodingArg::Latin1 => TextEncoding::Latin1,
		}
	}
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueKind {
	Text,
	Int,
	Uint,
	Long,
	Ulong,
	Short,
	Ushort,
	Bool,
	Datetime,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	let encoding = TextEncoding::from(cli.encoding);

	match cli.command {
		Commands::Get {
			file,
			section,
			entry,
			kind,
		} => handle_get(&load(&file, encoding)?, &section, &entry, kind),
		Commands::Add {
			file,
			section,
			entry,
			value,
		} => handle_add(load(&file, encoding)?, &section, &entry, &value),
		Commands::Set {
			file,
			section,
			entry,
			value,
		} => handle_set(load(&file, encoding)?, &section, &entry, &value),
		Commands::Delete {
			file,
			section,
			entry,
		} => handle_delete(load(&file, encoding)?, &section, entry.as_deref()),
		Commands::Sections { file } => handle_sections(&load(&file, encoding)?),
		Commands::Render { file } => {
			print!("{}", load(&file, encoding)?.render());
			Ok(ExitCode::SUCCESS)
		}
		Commands::Demo { path } => handle_demo(&path, encoding),
	}
}

fn load(path: &Path, encoding: TextEncoding) -> Result<Document> {
	Document::load_with_encoding(path, encoding)
		.with_context(|| format!("Failed to load {}", path.display()))
}

fn save(doc: &Document) -> Result<()> {
	doc.try_save().context("Failed to save config")
}

fn format_value(entry: &Entry, kind: ValueKind) -> String {
	match kind {
		ValueKind::Text => entry.value().to_string(),
		ValueKind::Int => entry.to_i32().to_string(),
		ValueKind::Uint => entry.to_u32().to_string(),
		ValueKind::Long => entry.to_i64().to_string(),
		ValueKind::Ulong => entry.to_u64().to_string(),
		ValueKind::Short => entry.to_i16().to_string(),
		ValueKind::Ushort => entry.to_u16().to_string(),
		ValueKind::Bool => entry.to_bool().to_string(),
		ValueKind::Datetime => entry.to_datetime().to_string(),
	}
}

fn handle_get(doc: &Document, section: &str, entry: &str, kind: ValueKind) -> Result<ExitCode> {
	match doc.entry(section, entry) {
		Some(found) => {
			println!("{}", format_value(found, kind));
			Ok(ExitCode::SUCCESS)
		}
		None => {
			eprintln!("Entry not found: [{}] {}", section, entry);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_add(mut doc: Document, section: &str, entry: &str, value: &str) -> Result<ExitCode> {
	if !doc.add_entry(section, entry, value) {
		eprintln!("Entry already exists: [{}] {}", section, entry);
		return Ok(ExitCode::FAILURE);
	}

	save(&doc)?;
	Ok(ExitCode::SUCCESS)
}

fn handle_set(mut doc: Document, section: &str, entry: &str, value: &str) -> Result<ExitCode> {
	if doc.has_entry(section, entry) {
		doc.set_entry(section, entry, value)?;
	} else {
		doc.add_entry(section, entry, value);
	}

	save(&doc)?;
	Ok(ExitCode::SUCCESS)
}

fn handle_delete(mut doc: Document, section: &str, entry: Option<&str>) -> Result<ExitCode> {
	let deleted = match entry {
		Some(entry) => doc
			.section_mut(section)
			.is_some_and(|s| s.delete(entry)),
		None => doc.delete_section(section),
	};

	if !deleted {
		match entry {
			Some(entry) => eprintln!("Entry not found: [{}] {}", section, entry),
			None => eprintln!("Section not found: [{}]", section),
		}
		return Ok(ExitCode::FAILURE);
	}

	save(&doc)?;
	Ok(ExitCode::SUCCESS)
}

fn handle_sections(doc: &Document) -> Result<ExitCode> {
	if doc.is_empty() {
		println!("No sections.");
		return Ok(ExitCode::SUCCESS);
	}

	for section in doc {
		println!("[{}] ({} entries)", section.name(), section.len());
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_demo(path: &Path, encoding: TextEncoding) -> Result<ExitCode> {
	let mut config = Document::new();
	config.set_encoding(encoding);

	config.add_entry("Login", "Username", "par0noid");
	config.add_entry("Login", "Password", "secret");
	config.add_entry("Windows", "Trayicon", "on");
	config.add_entry("Game", "Points", 1234);

	if config
		.entry("Windows", "Trayicon")
		.is_some_and(Entry::to_bool)
		&& let Some(user) = config.entry("Login", "Username")
	{
		println!("{} has an activated trayicon", user);
	}

	config
		.try_save_as(path)
		.with_context(|| format!("Failed to write {}", path.display()))?;

	println!("Saved {}", path.display());
	Ok(ExitCode::SUCCESS)
}
