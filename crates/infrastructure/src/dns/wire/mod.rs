pub mod codec;
pub mod message_builder;
pub mod record_render;
pub mod record_type_map;

pub use codec::HickoryWireCodec;
pub use message_builder::MessageBuilder;
pub use record_render::RecordRenderer;
pub use record_type_map::RecordTypeMapper;
