use dossiolib::{decode, encode_dossier};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: запись любого диалекта -> каноническое досье -> запись для обоих бэкендов (stdin -> stdout)
    let wire: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(std::io::stdin()))?;
    let dossier = decode(&wire)?;
    let out = encode_dossier(&dossier, dossier.is_persisted());
    serde_json::to_writer_pretty(std::io::stdout(), &out)?;
    Ok(())
}
