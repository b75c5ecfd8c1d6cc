use crate::errors::{AppError, AppResult};
use crate::export::model::{HEADERS, record_to_row};
use crate::models::NormalizedRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the ContaPyme CSV (BOM, header, one line per record) to `out`.
/// Records are written in the order given.
pub fn write_contapyme_csv<W: Write>(records: &[NormalizedRecord], mut out: W) -> AppResult<()> {
    out.write_all(UTF8_BOM)?;

    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    wtr.write_record(HEADERS)?;

    for r in records {
        wtr.write_record(record_to_row(r))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    Ok(())
}

/// Render the whole export in memory.
pub fn render_contapyme_csv(records: &[NormalizedRecord]) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_contapyme_csv(records, &mut buf)?;
    Ok(buf)
}
