use super::message_builder::MessageBuilder;
use dohgate_domain::{DomainError, RecordData, ResourceRecord};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use std::sync::Arc;

/// Longest character-string a TXT record can carry.
const MAX_TXT_STRING: usize = 255;

/// Conversion between resolver records and hickory wire records.
pub struct RecordRenderer;

impl RecordRenderer {
    pub fn to_hickory(record: &ResourceRecord) -> Result<Record, DomainError> {
        let name = MessageBuilder::parse_name(&record.name)?;
        let class = Self::class_to_hickory(record.class)?;

        let rdata = match &record.data {
            RecordData::A(ip) => RData::A(A(*ip)),
            RecordData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
            RecordData::CNAME(target) => RData::CNAME(CNAME(MessageBuilder::parse_name(target)?)),
            RecordData::NS(target) => RData::NS(NS(MessageBuilder::parse_name(target)?)),
            RecordData::PTR(target) => RData::PTR(PTR(MessageBuilder::parse_name(target)?)),
            RecordData::MX {
                preference,
                exchange,
            } => RData::MX(MX::new(*preference, MessageBuilder::parse_name(exchange)?)),
            RecordData::TXT(strings) => {
                if let Some(long) = strings.iter().find(|s| s.len() > MAX_TXT_STRING) {
                    return Err(DomainError::Codec(format!(
                        "TXT string of {} bytes exceeds {}",
                        long.len(),
                        MAX_TXT_STRING
                    )));
                }
                RData::TXT(TXT::new(strings.clone()))
            }
            RecordData::SRV {
                priority,
                weight,
                port,
                target,
            } => RData::SRV(SRV::new(
                *priority,
                *weight,
                *port,
                MessageBuilder::parse_name(target)?,
            )),
            RecordData::SOA {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => RData::SOA(SOA::new(
                MessageBuilder::parse_name(mname)?,
                MessageBuilder::parse_name(rname)?,
                *serial,
                *refresh,
                *retry,
                *expire,
                *minimum,
            )),
        };

        let mut rendered = Record::from_rdata(name, record.ttl, rdata);
        rendered.set_dns_class(class);
        Ok(rendered)
    }

    /// Returns `None` for rdata this gateway does not model.
    pub fn from_hickory(record: &Record) -> Option<ResourceRecord> {
        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
            RData::CNAME(cname) => RecordData::CNAME(name_text(&cname.0)),
            RData::NS(ns) => RecordData::NS(name_text(&ns.0)),
            RData::PTR(ptr) => RecordData::PTR(name_text(&ptr.0)),
            RData::MX(mx) => RecordData::MX {
                preference: mx.preference(),
                exchange: name_text(mx.exchange()),
            },
            RData::TXT(txt) => RecordData::TXT(
                txt.txt_data()
                    .iter()
                    .map(|s| String::from_utf8_lossy(s).into_owned())
                    .collect(),
            ),
            RData::SRV(srv) => RecordData::SRV {
                priority: srv.priority(),
                weight: srv.weight(),
                port: srv.port(),
                target: name_text(srv.target()),
            },
            RData::SOA(soa) => RecordData::SOA {
                mname: name_text(soa.mname()),
                rname: name_text(soa.rname()),
                serial: soa.serial(),
                refresh: soa.refresh(),
                retry: soa.retry(),
                expire: soa.expire(),
                minimum: soa.minimum(),
            },
            _ => return None,
        };

        Some(
            ResourceRecord::new(name_text(record.name()), record.ttl(), data)
                .with_class(u16::from(record.dns_class())),
        )
    }

    fn class_to_hickory(class: u16) -> Result<DNSClass, DomainError> {
        match class {
            1 => Ok(DNSClass::IN),
            3 => Ok(DNSClass::CH),
            4 => Ok(DNSClass::HS),
            other => Err(DomainError::Codec(format!(
                "record class {} cannot carry answer data",
                other
            ))),
        }
    }
}

fn name_text(name: &Name) -> Arc<str> {
    let text = name.to_ascii();
    Arc::from(text.strip_suffix('.').unwrap_or(&text))
}
