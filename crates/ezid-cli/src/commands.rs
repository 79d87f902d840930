use std::io::Write;

use anyhow::Context;
use ezid::{
    BitWidth, CUSTOM_EPOCH, FormatConfig, IdText, RandSource, SnowflakeGenerator, SystemClock,
    ThreadRandom, TimeRandomGenerator, layout,
};
use serde::Serialize;

use crate::config::{Action, AppConfig};

/// Decoded components of one id.
///
/// `timestamp` is in the layout's own unit: milliseconds since
/// [`CUSTOM_EPOCH`] for 64-bit ids, unix seconds for 96-bit ids.
/// `unix_millis` normalizes both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub id: IdText,
    pub bits: u8,
    pub raw: String,
    pub timestamp: u64,
    pub unix_millis: u64,
    pub generator_id: u64,
    pub sequence: u64,
}

pub fn run(config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.action {
        Action::Generate {
            count,
            generator_id,
        } => {
            let ids = generate(&config.format, *count, *generator_id)?;
            tracing::info!(count = ids.len(), width = %config.format.width(), "generated ids");
            if config.json {
                serde_json::to_writer(&mut *out, &ids)?;
                writeln!(out)?;
            } else {
                for id in &ids {
                    writeln!(out, "{id}")?;
                }
            }
        }
        Action::Inspect { ids } => {
            let reports = ids
                .iter()
                .map(|id| inspect(&config.format, id))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if config.json {
                serde_json::to_writer_pretty(&mut *out, &reports)?;
                writeln!(out)?;
            } else {
                for r in &reports {
                    writeln!(
                        out,
                        "{} bits={} raw={} timestamp={} unix_millis={} generator_id={} sequence={}",
                        r.id,
                        r.bits,
                        r.raw,
                        r.timestamp,
                        r.unix_millis,
                        r.generator_id,
                        r.sequence
                    )?;
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Allocates `count` ids from a fresh generator and formats them.
pub fn generate(
    format: &FormatConfig,
    count: usize,
    generator_id: Option<u64>,
) -> anyhow::Result<Vec<IdText>> {
    match format.width() {
        BitWidth::Bits64 => {
            let generator_id = i64::try_from(generator_id.unwrap_or(0))?;
            let generator = SnowflakeGenerator::with_generator_id(generator_id)?;
            (0..count)
                .map(|_| -> anyhow::Result<IdText> {
                    Ok(format.format_u64(generator.next_id()?)?)
                })
                .collect()
        }
        BitWidth::Bits96 => {
            let generator = match generator_id {
                Some(id) => TimeRandomGenerator::from_components(
                    id,
                    RandSource::<u32>::rand(&ThreadRandom),
                    SystemClock,
                ),
                None => TimeRandomGenerator::new(SystemClock, &ThreadRandom),
            };
            (0..count)
                .map(|_| -> anyhow::Result<IdText> {
                    Ok(format.format_bytes(&generator.next_raw())?)
                })
                .collect()
        }
    }
}

/// Parses one formatted id and splits it into its components.
pub fn inspect(format: &FormatConfig, text: &str) -> anyhow::Result<Inspection> {
    let context = || format!("cannot inspect {text:?}");
    match format.width() {
        BitWidth::Bits64 => {
            let raw = format.parse_u64(text).with_context(context)?;
            let (timestamp, generator_id, sequence) = layout::unpack_compact(raw);
            Ok(Inspection {
                id: format.format_u64(raw)?,
                bits: 64,
                raw: format!("{raw:016x}"),
                timestamp,
                unix_millis: timestamp + CUSTOM_EPOCH.as_millis() as u64,
                generator_id,
                sequence,
            })
        }
        BitWidth::Bits96 => {
            let raw = format.parse_bytes(text).with_context(context)?;
            let (timestamp, generator_id, sequence) = layout::unpack_ezid(&raw);
            Ok(Inspection {
                id: format.format_bytes(&raw)?,
                bits: 96,
                raw: raw.iter().map(|b| format!("{b:02x}")).collect(),
                timestamp: u64::from(timestamp),
                unix_millis: u64::from(timestamp) * 1_000,
                generator_id,
                sequence: u64::from(sequence),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezid::{Separator, SnowflakeGenerator};
    use std::collections::HashSet;

    fn run_to_string(config: &AppConfig) -> String {
        let mut out = Vec::new();
        run(config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn generate_prints_one_id_per_line() {
        let config = AppConfig {
            format: FormatConfig::DEFAULT_COMPACT,
            json: false,
            action: Action::Generate {
                count: 100,
                generator_id: Some(7),
            },
        };
        let out = run_to_string(&config);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 100);
        assert!(lines.iter().all(|l| l.len() == 15));
        assert_eq!(lines.iter().collect::<HashSet<_>>().len(), 100);

        let first = inspect(&config.format, lines[0]).unwrap();
        assert_eq!(first.generator_id, 7);
    }

    #[test]
    fn generate_json_is_an_array_of_strings() {
        let format = FormatConfig::new(BitWidth::Bits96, Separator::None, &[]).unwrap();
        let config = AppConfig {
            format,
            json: true,
            action: Action::Generate {
                count: 3,
                generator_id: Some(0xAB_CDEF_0123),
            },
        };
        let ids: Vec<String> = serde_json::from_str(&run_to_string(&config)).unwrap();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert_eq!(id.len(), 20);
            assert_eq!(inspect(&format, id).unwrap().generator_id, 0xAB_CDEF_0123);
        }
    }

    #[test]
    fn inspect_compact_boundary() {
        let report = inspect(&FormatConfig::DEFAULT_COMPACT, "ZZZ-ZZZZZZZ-ZQY").unwrap();
        assert_eq!(
            report,
            Inspection {
                id: FormatConfig::DEFAULT_COMPACT.format_u64(i64::MAX as u64).unwrap(),
                bits: 64,
                raw: "7fffffffffffffff".to_owned(),
                timestamp: layout::MAX_TIMESTAMP,
                unix_millis: layout::MAX_TIMESTAMP + CUSTOM_EPOCH.as_millis() as u64,
                generator_id: 1023,
                sequence: 4095,
            }
        );
    }

    #[test]
    fn inspect_reports_generator_output() {
        let generator = SnowflakeGenerator::with_generator_id(99).unwrap();
        let raw = generator.next_id().unwrap();
        let text = FormatConfig::DEFAULT_COMPACT.format_u64(raw).unwrap();

        let report = inspect(&FormatConfig::DEFAULT_COMPACT, text.as_str()).unwrap();
        assert_eq!(report.generator_id, 99);
        assert_eq!(report.raw, format!("{raw:016x}"));
    }

    #[test]
    fn inspect_json_output() {
        let config = AppConfig {
            format: FormatConfig::DEFAULT_EZID,
            json: true,
            action: Action::Inspect {
                ids: vec!["00000-0000000000-00000".to_owned()],
            },
        };
        let value: serde_json::Value = serde_json::from_str(&run_to_string(&config)).unwrap();
        assert_eq!(value[0]["id"], "00000-0000000000-00000");
        assert_eq!(value[0]["bits"], 96);
        assert_eq!(value[0]["raw"], "000000000000000000000000");
        assert_eq!(value[0]["sequence"], 0);
    }

    #[test]
    fn inspect_rejects_bad_input() {
        let err = inspect(&FormatConfig::DEFAULT_COMPACT, "000-0000000-00U").unwrap_err();
        assert!(err.to_string().contains("cannot inspect"), "{err}");
        assert!(format!("{err:#}").contains("invalid character 'U'"), "{err:#}");

        let err = inspect(&FormatConfig::DEFAULT_COMPACT, "").unwrap_err();
        assert!(format!("{err:#}").contains("invalid length"), "{err:#}");
    }
}
