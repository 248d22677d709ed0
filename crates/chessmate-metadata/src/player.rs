/// A player as recorded on a single game's header pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerInfo {
    pub name: String,
    pub fide_id: Option<String>,
    pub rating: Option<i32>,
}

impl PlayerInfo {
    pub(crate) fn from_tags(name: Option<&str>, fide_id: Option<&str>, rating: Option<&str>) -> Self {
        Self {
            name: name.unwrap_or("?").trim().to_string(),
            fide_id: fide_id
                .map(str::trim)
                .filter(|s| !s.is_empty() && *s != "?" && *s != "0"),
            rating: rating.and_then(|s| s.trim().parse::<i32>().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_present_tags() {
        let player = PlayerInfo::from_tags(Some("Carlsen, Magnus"), Some("1503014"), Some("2839"));
        assert_eq!(player.name, "Carlsen, Magnus");
        assert_eq!(player.fide_id.as_deref(), Some("1503014"));
        assert_eq!(player.rating, Some(2839));
    }

    #[test]
    fn treats_missing_or_placeholder_fide_id_as_absent() {
        assert_eq!(PlayerInfo::from_tags(Some("X"), None, None).fide_id, None);
        assert_eq!(PlayerInfo::from_tags(Some("X"), Some("?"), None).fide_id, None);
        assert_eq!(PlayerInfo::from_tags(Some("X"), Some("0"), None).fide_id, None);
    }

    #[test]
    fn falls_back_to_a_placeholder_name() {
        assert_eq!(PlayerInfo::from_tags(None, None, None).name, "?");
    }

    #[test]
    fn unparsable_rating_is_none() {
        assert_eq!(PlayerInfo::from_tags(Some("X"), None, Some("????")).rating, None);
    }
}
