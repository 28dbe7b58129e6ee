//! Serial commands sent by a host computer.
//!
//! Every command is one line of text. Anything that is not one of the
//! recognised commands is rejected as [`CommandError::Unsupported`] and the
//! caller simply ignores it.

/// Number of leading characters of a spectrum line that carry band levels
pub const SPECTRUM_BANDS_LEN: usize = 11;

/// Payloads at or below this length are too short to be an image
pub const MIN_IMAGE_PAYLOAD_LEN: usize = 16;

/// Longest sensor label accepted
pub const MAX_LABEL_LEN: usize = 9;

const SENSORS_PREFIX: &str = "SENSORS: ";
const CLOCK_PREFIX: &str = "CLOCK";
const TEXT_PREFIX: &str = "TXT: ";
const IMAGE_PREFIX: &str = "BMP: ";

/// Errors that can occur while parsing a serial command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line does not match any known command
    Unsupported,
    /// `SENSORS:` line without three `label=value` pairs
    MalformedSensors,
    /// Sensor label is empty or longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
    /// Spectrum line whose band prefix is not a non-zero number
    InvalidSpectrum,
}

/// One `label=value` pair of a `SENSORS:` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading<'a> {
    pub label: &'a str,
    pub value: i32,
}

/// A parsed serial command borrowing from the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialCommand<'a> {
    /// Three readouts shown on the hours, minutes and seconds panel pairs
    Sensors([SensorReading<'a>; 3]),
    /// Return to showing the clock
    Clock,
    /// Text shown on every panel
    Text(&'a str),
    /// Base64 encoded bitmap
    Image(&'a str),
    /// Band levels `0`-`9`, one character per band, plus optional text
    Spectrum {
        bands: &'a str,
        lyric: Option<&'a str>,
    },
}

impl<'a> SerialCommand<'a> {
    /// Parse one line (without its terminator)
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        if let Some(rest) = line.strip_prefix(SENSORS_PREFIX) {
            return parse_sensors(rest).map(SerialCommand::Sensors);
        }
        if line.starts_with(CLOCK_PREFIX) {
            return Ok(SerialCommand::Clock);
        }
        if let Some(text) = line.strip_prefix(TEXT_PREFIX) {
            return Ok(SerialCommand::Text(text));
        }
        if line.len() > MIN_IMAGE_PAYLOAD_LEN {
            if let Some(payload) = line.strip_prefix(IMAGE_PREFIX) {
                return Ok(SerialCommand::Image(payload));
            }
        }
        if line.len() >= SPECTRUM_BANDS_LEN {
            return parse_spectrum(line);
        }
        Err(CommandError::Unsupported)
    }

    /// Returns true if acting on this command replaces the clock face
    pub fn is_external_content(&self) -> bool {
        !matches!(self, SerialCommand::Clock)
    }
}

fn parse_spectrum(line: &str) -> Result<SerialCommand<'_>, CommandError> {
    if !line.is_char_boundary(SPECTRUM_BANDS_LEN) {
        return Err(CommandError::InvalidSpectrum);
    }
    let (bands, rest) = line.split_at(SPECTRUM_BANDS_LEN);
    if !leading_integer_is_nonzero(bands) {
        return Err(CommandError::InvalidSpectrum);
    }
    let lyric = if rest.len() > 1 { Some(rest) } else { None };
    Ok(SerialCommand::Spectrum { bands, lyric })
}

/// Same acceptance rule as C `atol(s) != 0`: optional whitespace and sign,
/// then a run of digits that is not all zeros.
fn leading_integer_is_nonzero(s: &str) -> bool {
    let s = s.trim_start();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    s.bytes()
        .take_while(u8::is_ascii_digit)
        .any(|b| b != b'0')
}

/// Minimal cursor over the `label=value, label=value, label=value` body
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn expect(&mut self, c: char) -> Result<(), CommandError> {
        self.rest = self
            .rest
            .strip_prefix(c)
            .ok_or(CommandError::MalformedSensors)?;
        Ok(())
    }

    fn label(&mut self) -> Result<&'a str, CommandError> {
        let end = self.rest.find('=').ok_or(CommandError::MalformedSensors)?;
        let label = &self.rest[..end];
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(CommandError::LabelTooLong);
        }
        self.rest = &self.rest[end..];
        Ok(label)
    }

    fn integer(&mut self) -> Result<i32, CommandError> {
        self.skip_whitespace();
        let sign_len = usize::from(self.rest.starts_with(['+', '-']));
        let digits = self.rest[sign_len..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return Err(CommandError::MalformedSensors);
        }
        let (number, rest) = self.rest.split_at(sign_len + digits);
        self.rest = rest;
        number.parse().map_err(|_| CommandError::MalformedSensors)
    }
}

fn parse_sensors(body: &str) -> Result<[SensorReading<'_>; 3], CommandError> {
    let mut cursor = Cursor { rest: body };
    let mut readings = [SensorReading { label: "", value: 0 }; 3];

    for (i, reading) in readings.iter_mut().enumerate() {
        if i > 0 {
            cursor.skip_whitespace();
            cursor.expect(',')?;
        }
        cursor.skip_whitespace();
        reading.label = cursor.label()?;
        cursor.expect('=')?;
        reading.value = cursor.integer()?;
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sensors() {
        let cmd = SerialCommand::parse("SENSORS: CPU=42, MEM=63, GPU=7").unwrap();
        let SerialCommand::Sensors(readings) = cmd else {
            panic!("expected sensors, got {:?}", cmd);
        };
        assert_eq!(readings[0], SensorReading { label: "CPU", value: 42 });
        assert_eq!(readings[1], SensorReading { label: "MEM", value: 63 });
        assert_eq!(readings[2], SensorReading { label: "GPU", value: 7 });
    }

    #[test]
    fn test_parse_sensors_negative_and_spacing() {
        let cmd = SerialCommand::parse("SENSORS: T1= -5,T2=+3 ,  T3=0").unwrap();
        let SerialCommand::Sensors(readings) = cmd else {
            panic!("expected sensors");
        };
        assert_eq!(readings[0].value, -5);
        assert_eq!(readings[1].value, 3);
        assert_eq!(readings[2].label, "T3");
    }

    #[test]
    fn test_parse_sensors_missing_pair() {
        assert_eq!(
            SerialCommand::parse("SENSORS: CPU=42, MEM=63"),
            Err(CommandError::MalformedSensors)
        );
    }

    #[test]
    fn test_parse_sensors_label_too_long() {
        assert_eq!(
            SerialCommand::parse("SENSORS: TEMPERATURE=42, MEM=63, GPU=7"),
            Err(CommandError::LabelTooLong)
        );
    }

    #[test]
    fn test_parse_sensors_missing_value() {
        assert_eq!(
            SerialCommand::parse("SENSORS: CPU=, MEM=63, GPU=7"),
            Err(CommandError::MalformedSensors)
        );
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(SerialCommand::parse("CLOCK"), Ok(SerialCommand::Clock));
        assert_eq!(SerialCommand::parse("CLOCK please"), Ok(SerialCommand::Clock));
        assert!(!SerialCommand::Clock.is_external_content());
    }

    #[test]
    fn test_parse_text() {
        let cmd = SerialCommand::parse("TXT: Hello world").unwrap();
        assert_eq!(cmd, SerialCommand::Text("Hello world"));
        assert!(cmd.is_external_content());
    }

    #[test]
    fn test_parse_image() {
        let line = "BMP: Qk02AAAAAAAAADYAAAAo";
        assert_eq!(
            SerialCommand::parse(line),
            Ok(SerialCommand::Image("Qk02AAAAAAAAADYAAAAo"))
        );
    }

    #[test]
    fn test_short_image_is_not_an_image() {
        // Too short for an image, and not a valid spectrum either
        assert_eq!(
            SerialCommand::parse("BMP: Qk02AAAA"),
            Err(CommandError::InvalidSpectrum)
        );
    }

    #[test]
    fn test_parse_spectrum_with_lyric() {
        let cmd = SerialCommand::parse("30579642100 la la la").unwrap();
        assert_eq!(
            cmd,
            SerialCommand::Spectrum {
                bands: "30579642100",
                lyric: Some(" la la la"),
            }
        );
    }

    #[test]
    fn test_parse_spectrum_without_lyric() {
        let cmd = SerialCommand::parse("00000000001 ").unwrap();
        assert_eq!(
            cmd,
            SerialCommand::Spectrum {
                bands: "00000000001",
                lyric: None,
            }
        );
    }

    #[test]
    fn test_all_zero_spectrum_rejected() {
        assert_eq!(
            SerialCommand::parse("00000000000"),
            Err(CommandError::InvalidSpectrum)
        );
    }

    #[test]
    fn test_spectrum_multibyte_boundary_rejected() {
        assert_eq!(
            SerialCommand::parse("1234567890é"),
            Err(CommandError::InvalidSpectrum)
        );
    }

    #[test]
    fn test_short_unknown_line() {
        assert_eq!(SerialCommand::parse("hello"), Err(CommandError::Unsupported));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_never_panics(line in "\\PC{0,64}") {
                let _ = SerialCommand::parse(&line);
            }

            #[test]
            fn sensor_values_roundtrip(a in -99i32..100, b in -99i32..100, c in -99i32..100) {
                let line = format!("SENSORS: A={}, B={}, C={}", a, b, c);
                let cmd = SerialCommand::parse(&line).unwrap();
                let SerialCommand::Sensors(r) = cmd else {
                    panic!("expected sensors");
                };
                prop_assert_eq!([r[0].value, r[1].value, r[2].value], [a, b, c]);
            }
        }
    }
}
