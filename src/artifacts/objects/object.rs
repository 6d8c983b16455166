use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Parse the object body; the `<type> <size>\0` header has already been consumed.
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;

        Ok(ObjectId::digest(&content))
    }
}

/// Prefix an object body with its `<type> <size>\0` header
pub(crate) fn frame(object_type: ObjectType, body: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), body.len());

    let mut framed = Vec::with_capacity(header.len() + body.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(body);

    Bytes::from(framed)
}
