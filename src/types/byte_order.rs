use serde::{Deserialize, Serialize};

/// Byte order tag leading every WKB record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// XDR, tag value 0.
    BigEndian,
    /// NDR, tag value 1.
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Wire value of the tag.
    #[inline]
    pub fn to_tag(self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    /// Decode a tag byte; `None` for anything other than 0 or 1.
    #[inline]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ByteOrder::BigEndian),
            1 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ByteOrder;

    #[test]
    fn tag_values() {
        assert_eq!(ByteOrder::from_tag(0), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::from_tag(1), Some(ByteOrder::LittleEndian));
        assert_eq!(ByteOrder::from_tag(2), None);
        assert_eq!(ByteOrder::BigEndian.to_tag(), 0);
        assert_eq!(ByteOrder::LittleEndian.to_tag(), 1);
    }

    #[test]
    fn json_names() {
        assert_eq!(serde_json::to_string(&ByteOrder::BigEndian).unwrap(), r#""bigendian""#);
        assert_eq!(serde_json::from_str::<ByteOrder>(r#""littleendian""#).unwrap(), ByteOrder::LittleEndian);
    }
}
