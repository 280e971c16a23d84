//! DNS query construction in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dohgate_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::domain::Label;
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive single-question query with a random id.
    ///
    /// Returns the id together with the serialized bytes so callers can
    /// match the response.
    pub fn build_query_with_id(
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Self::parse_name(domain)?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Parse a name in presentation form, the inverse of `Name::to_ascii`.
    ///
    /// `\DDD` (octal) and `\c` escapes become raw label bytes, so labels
    /// holding spaces or non-UTF-8 octets survive the trip. Labels with
    /// unescaped non-ASCII text are IDNA-encoded.
    pub fn parse_name(domain: &str) -> Result<Name, DomainError> {
        let invalid =
            |reason: String| DomainError::Codec(format!("invalid domain '{}': {}", domain, reason));

        if domain.is_empty() || domain == "." {
            return Ok(Name::root());
        }

        let mut labels = Vec::new();
        let mut label: Vec<u8> = Vec::new();
        let mut unicode = false;
        let mut chars = domain.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    labels.push(Self::finish_label(&label, unicode).map_err(invalid)?);
                    label.clear();
                    unicode = false;
                }
                '\\' => label.push(Self::unescape(&mut chars).map_err(invalid)?),
                c if c.is_ascii() => label.push(c as u8),
                c => {
                    unicode = true;
                    let mut buf = [0u8; 4];
                    label.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
        if !label.is_empty() {
            labels.push(Self::finish_label(&label, unicode).map_err(invalid)?);
        }

        Name::from_labels(labels).map_err(|e| invalid(e.to_string()))
    }

    fn finish_label(bytes: &[u8], unicode: bool) -> Result<Label, String> {
        if bytes.is_empty() {
            return Err("empty label".to_string());
        }
        let label = match std::str::from_utf8(bytes) {
            Ok(text) if unicode => Label::from_utf8(text),
            _ => Label::from_raw_bytes(bytes),
        };
        label.map_err(|e| e.to_string())
    }

    fn unescape(chars: &mut std::str::Chars<'_>) -> Result<u8, String> {
        let first = chars.next().ok_or("dangling escape")?;
        if !first.is_ascii_digit() {
            return u8::try_from(first).map_err(|_| format!("cannot escape '{}'", first));
        }

        let mut value = 0u32;
        for digit in [Some(first), chars.next(), chars.next()] {
            let d = digit
                .and_then(|c| c.to_digit(8))
                .ok_or("escape needs three octal digits")?;
            value = value * 8 + d;
        }
        u8::try_from(value).map_err(|_| format!("escape \\{:o} out of range", value))
    }

    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::Codec(format!("failed to serialize DNS message: {}", e)))?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_sets_recursion_desired() {
        let (_, bytes) = MessageBuilder::build_query_with_id("example.com", RecordType::A).unwrap();

        assert!(bytes.len() >= 12, "DNS message too short: {} bytes", bytes.len());
        // Byte 2: QR(1) + Opcode(4) + AA(1) + TC(1) + RD(1)
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
        assert_eq!(bytes[2] & 0x80, 0, "QR flag should be clear");
    }

    #[test]
    fn test_wire_id_matches_returned_id() {
        let (id, bytes) = MessageBuilder::build_query_with_id("test.com", RecordType::AAAA).unwrap();
        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), id);
    }

    #[test]
    fn test_single_question() {
        let (_, bytes) = MessageBuilder::build_query_with_id("example.org", RecordType::MX).unwrap();
        let message = Message::from_vec(&bytes).unwrap();
        assert_eq!(message.queries().len(), 1);
        assert_eq!(
            message.queries()[0].query_type(),
            hickory_proto::rr::RecordType::MX
        );
    }

    #[test]
    fn test_label_too_long_is_codec_error() {
        let label = "a".repeat(64);
        let result = MessageBuilder::build_query_with_id(&format!("{}.com", label), RecordType::A);
        assert!(matches!(result, Err(DomainError::Codec(_))));
    }

    #[test]
    fn test_escaped_labels_parse_to_raw_bytes() {
        let name = MessageBuilder::parse_name("a\\040b.\\377.example").unwrap();
        let labels: Vec<&[u8]> = name.iter().collect();

        assert_eq!(labels, vec![&b"a b"[..], &[0xff][..], &b"example"[..]]);
        assert_eq!(name.to_ascii(), "a\\040b.\\377.example.");
    }

    #[test]
    fn test_punycode_label_is_kept_verbatim() {
        let name = MessageBuilder::parse_name("xn--bcher-kva.example").unwrap();
        assert_eq!(name.to_ascii(), "xn--bcher-kva.example.");
    }

    #[test]
    fn test_unicode_label_is_idna_encoded() {
        let name = MessageBuilder::parse_name("bücher.example").unwrap();
        assert_eq!(name.to_ascii(), "xn--bcher-kva.example.");
    }

    #[test]
    fn test_bad_escapes_are_codec_errors() {
        for domain in ["a\\9.example", "a\\01", "a\\", "a..example"] {
            let result = MessageBuilder::parse_name(domain);
            assert!(matches!(result, Err(DomainError::Codec(_))), "{}", domain);
        }
    }

    #[test]
    fn test_root_name() {
        assert!(MessageBuilder::parse_name(".").unwrap().is_root());
    }
}
