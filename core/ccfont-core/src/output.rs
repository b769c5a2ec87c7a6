//! Report writers for processed fonts (ccfont-core)

use std::io::{self, Write};

use crate::config::ReportFormat;
use crate::copy::CopyRecord;

/// Write the tab-separated mapping line: `<cache name>\t->\t<family>.otf`.
pub fn write_mapping(record: &CopyRecord, mut w: impl Write) -> io::Result<()> {
    writeln!(w, "{}\t->\t{}", record.file_name, record.output_name)
}

/// Write a single record as one NDJSON line.
pub fn write_ndjson_record(record: &CopyRecord, mut w: impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut w, record).map_err(io::Error::from)?;
    w.write_all(b"\n")
}

/// Write all records as a prettified JSON array.
pub fn write_json_pretty(records: &[CopyRecord], mut w: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut w, records).map_err(io::Error::from)?;
    w.write_all(b"\n")
}

/// Report one font as soon as it is done. JSON arrays wait for [`finish_report`].
pub fn emit_record(format: ReportFormat, record: &CopyRecord, w: impl Write) -> io::Result<()> {
    match format {
        ReportFormat::Plain => write_mapping(record, w),
        ReportFormat::Ndjson => write_ndjson_record(record, w),
        ReportFormat::Json => Ok(()),
    }
}

/// Close out the report once every font has been handled.
pub fn finish_report(format: ReportFormat, records: &[CopyRecord], mut w: impl Write) -> io::Result<()> {
    if format == ReportFormat::Json {
        write_json_pretty(records, &mut w)?;
    }
    w.flush()
}
