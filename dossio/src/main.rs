use clap::{Parser, ValueEnum};
use dossiolib::{
    classify,
    coerce::as_existing_id,
    encode,
    envelope::decode_envelope,
    error::{DossioError, Result},
    model::{Dossier, DossierPatch},
    WireDossier,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InFmt {
    /// Сырая запись любого диалекта
    Wire,
    /// Конверт API `{success, data}`
    Envelope,
    /// Каноническое (возможно частичное) досье
    Canonical,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutFmt {
    /// Каноническое досье
    Canonical,
    /// Запись для бэкенда (оба диалекта сразу)
    Wire,
    /// Только имя диалекта входной записи
    Dialect,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Обновление, если id досье — положительное целое
    Auto,
    Create,
    Update,
}

#[derive(Parser, Debug)]
#[command(name = "dossio", version, about = "Согласование диалектов API досье")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Формат входа
    #[arg(long = "in-format", value_enum, default_value_t = InFmt::Wire)]
    in_format: InFmt,

    /// Формат выхода
    #[arg(long = "out-format", value_enum, default_value_t = OutFmt::Canonical)]
    out_format: OutFmt,

    /// Создание или обновление при записи в провод
    #[arg(long = "mode", value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Человекочитаемый JSON
    #[arg(long = "pretty")]
    pretty: bool,
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout занят JSON-результатом, логи — в stderr
    if env_bool("DOSSIO_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

/// Что получилось прочитать: полное досье или частичное из канонического JSON.
enum Loaded {
    Full(Dossier),
    Partial(DossierPatch),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // reader
    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let input: Value = serde_json::from_reader(BufReader::new(reader))?;

    let out = if cli.out_format == OutFmt::Dialect {
        if cli.in_format != InFmt::Wire {
            return Err(DossioError::UnexpectedShape("a wire record for --out-format dialect"));
        }
        Value::String(classify(&input)?.to_string())
    } else {
        let loaded = match cli.in_format {
            InFmt::Wire => {
                let wire = WireDossier::from_value(input)?;
                info!(dialect = %wire.dialect(), "decoding wire record");
                Loaded::Full(wire.decode())
            }
            InFmt::Envelope => Loaded::Full(decode_envelope(input)?),
            InFmt::Canonical => Loaded::Partial(serde_json::from_value(input)?),
        };
        render(loaded, cli.out_format, cli.mode)?
    };

    // writer
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    if cli.pretty {
        serde_json::to_writer_pretty(&mut writer, &out)?;
    } else {
        serde_json::to_writer(&mut writer, &out)?;
    }
    writeln!(writer)?;
    writer.flush().map_err(DossioError::from)
}

fn render(loaded: Loaded, out_format: OutFmt, mode: Mode) -> Result<Value> {
    let patch = match (loaded, out_format) {
        (Loaded::Full(d), OutFmt::Canonical) => return Ok(serde_json::to_value(d)?),
        (Loaded::Partial(p), OutFmt::Canonical) => return Ok(serde_json::to_value(p)?),
        (Loaded::Full(d), _) => DossierPatch::from(d),
        (Loaded::Partial(p), _) => p,
    };
    let update = match mode {
        Mode::Create => false,
        Mode::Update => true,
        Mode::Auto => patch.id.as_deref().and_then(as_existing_id).is_some(),
    };
    info!(update, "encoding dossier");
    Ok(Value::Object(encode(&patch, update)))
}
