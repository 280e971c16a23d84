//! Mapping between `dohgate_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides carry the IANA TYPE code, so the mapping goes through `u16`
//! and never loses a type hickory does not know by name.

use dohgate_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
