//! Identifier conversions from MAVLink `UPPER_SNAKE` / `snake_case` names.

/// "SYS_STATUS" -> "SysStatus", "custom_mode" -> "CustomMode"
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect()
}

/// "custom_mode" -> "customMode"
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Entry name without its enum prefix, quoted when it would not be a valid
/// identifier ("MAV_TYPE_GENERIC" in "MAV_TYPE" -> "GENERIC",
/// "MAV_FRAME_3D" in "MAV_FRAME" -> "'3D'").
pub fn entry_name(enum_name: &str, entry: &str) -> String {
    let short = entry
        .strip_prefix(enum_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(entry);

    if short.starts_with(|c: char| c.is_ascii_digit()) {
        format!("'{}'", short)
    } else {
        short.to_string()
    }
}

/// Reference to an enum member, using bracket access for quoted names
/// (`MavFrame.GLOBAL`, `MavFrame['3D']`).
pub fn member_access(type_name: &str, enum_name: &str, entry: &str) -> String {
    let member = entry_name(enum_name, entry);
    if member.starts_with('\'') {
        format!("{}[{}]", type_name, member)
    } else {
        format!("{}.{}", type_name, member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("HEARTBEAT"), "Heartbeat");
        assert_eq!(to_pascal_case("SYS_STATUS"), "SysStatus");
        assert_eq!(to_pascal_case("custom_mode"), "CustomMode");
        assert_eq!(to_pascal_case("GPS_RAW_INT"), "GpsRawInt");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("custom_mode"), "customMode");
        assert_eq!(to_camel_case("type"), "type");
        assert_eq!(to_camel_case("target_system"), "targetSystem");
    }

    #[test]
    fn test_entry_name_strips_prefix() {
        assert_eq!(entry_name("MAV_TYPE", "MAV_TYPE_GENERIC"), "GENERIC");
        assert_eq!(entry_name("MAV_CMD", "MAV_CMD_NAV_WAYPOINT"), "NAV_WAYPOINT");
        assert_eq!(entry_name("MAV_FRAME", "MAV_FRAME_3D"), "'3D'");
        assert_eq!(entry_name("MAV_TYPE", "OTHER_NAME"), "OTHER_NAME");
        assert_eq!(entry_name("MAV_TYPE", "MAV_TYPE"), "MAV_TYPE");
    }

    #[test]
    fn test_member_access() {
        assert_eq!(
            member_access("MavCmd", "MAV_CMD", "MAV_CMD_NAV_WAYPOINT"),
            "MavCmd.NAV_WAYPOINT"
        );
        assert_eq!(
            member_access("MavCmd", "MAV_CMD", "MAV_CMD_3D_SCAN"),
            "MavCmd['3D_SCAN']"
        );
    }
}
