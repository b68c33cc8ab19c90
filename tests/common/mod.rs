use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `rows` identical line items of `quantity × rate` at `tax_rate`%.
pub fn generate_items_csv(
    path: &Path,
    rows: usize,
    quantity: &str,
    rate: &str,
    tax_rate: &str,
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["description", "quantity", "rate", "tax_rate"])?;

    for i in 1..=rows {
        wtr.write_record([&format!("Item {}", i), quantity, rate, tax_rate])?;
    }

    wtr.flush()?;
    Ok(())
}
