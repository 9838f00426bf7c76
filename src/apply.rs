use crate::error::Result;
use crate::ips_format::PatchRecord;

/// Apply decoded records to the image in order.
///
/// Records land wherever they point: a record reaching past the current
/// length grows the image to exactly `record.end()`, zero-filling any gap so
/// later records see stable offsets. A decoder error is propagated after
/// every record decoded before it has been applied; the partially patched
/// image is left as-is. Callers that need all-or-nothing must snapshot the
/// buffer first.
pub fn apply_records<I>(rom: &mut Vec<u8>, records: I) -> Result<()>
where
    I: IntoIterator<Item = Result<PatchRecord>>,
{
    for record in records {
        write_record(rom, &record?);
    }
    Ok(())
}

fn write_record(rom: &mut Vec<u8>, record: &PatchRecord) {
    let start = record.address() as usize;
    let end = record.end();
    if end > rom.len() {
        rom.resize(end, 0);
    }
    match record {
        PatchRecord::Literal { data, .. } => rom[start..end].copy_from_slice(data),
        PatchRecord::RunLength { value, .. } => rom[start..end].fill(*value),
    }
}
