//! The permission flag domain.
//!
//! Flags are positional bits in an arbitrary-width integer; bit 0 is the
//! least-significant flag. The domain is closed but versionable: adding a
//! variant here extends every set operation without further changes.

use std::fmt;

/// A single named permission flag.
///
/// Bit positions follow the upstream wire protocol and must never be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CreateInstantInvite = 0,
    KickMembers = 1,
    BanMembers = 2,
    /// Grants every other flag; short-circuits all override layers.
    Administrator = 3,
    ManageChannels = 4,
    ManageGuild = 5,
    AddReactions = 6,
    ViewAuditLog = 7,
    PrioritySpeaker = 8,
    Stream = 9,
    ViewChannel = 10,
    SendMessages = 11,
    SendTtsMessages = 12,
    ManageMessages = 13,
    EmbedLinks = 14,
    AttachFiles = 15,
    ReadMessageHistory = 16,
    MentionEveryone = 17,
    UseExternalEmojis = 18,
    ViewGuildInsights = 19,
    Connect = 20,
    Speak = 21,
    MuteMembers = 22,
    DeafenMembers = 23,
    MoveMembers = 24,
    UseVad = 25,
    ChangeNickname = 26,
    ManageNicknames = 27,
    ManageRoles = 28,
    ManageWebhooks = 29,
    ManageEmojisAndStickers = 30,
    UseApplicationCommands = 31,
    RequestToSpeak = 32,
    ManageEvents = 33,
    ManageThreads = 34,
    CreatePublicThreads = 35,
    CreatePrivateThreads = 36,
    UseExternalStickers = 37,
    SendMessagesInThreads = 38,
    UseEmbeddedActivities = 39,
    /// Transient timeout marker; never part of a grant.
    TimedOut = 40,
}

impl Permission {
    /// Every flag in the domain, in bit order.
    pub const ALL: [Permission; 41] = [
        Permission::CreateInstantInvite,
        Permission::KickMembers,
        Permission::BanMembers,
        Permission::Administrator,
        Permission::ManageChannels,
        Permission::ManageGuild,
        Permission::AddReactions,
        Permission::ViewAuditLog,
        Permission::PrioritySpeaker,
        Permission::Stream,
        Permission::ViewChannel,
        Permission::SendMessages,
        Permission::SendTtsMessages,
        Permission::ManageMessages,
        Permission::EmbedLinks,
        Permission::AttachFiles,
        Permission::ReadMessageHistory,
        Permission::MentionEveryone,
        Permission::UseExternalEmojis,
        Permission::ViewGuildInsights,
        Permission::Connect,
        Permission::Speak,
        Permission::MuteMembers,
        Permission::DeafenMembers,
        Permission::MoveMembers,
        Permission::UseVad,
        Permission::ChangeNickname,
        Permission::ManageNicknames,
        Permission::ManageRoles,
        Permission::ManageWebhooks,
        Permission::ManageEmojisAndStickers,
        Permission::UseApplicationCommands,
        Permission::RequestToSpeak,
        Permission::ManageEvents,
        Permission::ManageThreads,
        Permission::CreatePublicThreads,
        Permission::CreatePrivateThreads,
        Permission::UseExternalStickers,
        Permission::SendMessagesInThreads,
        Permission::UseEmbeddedActivities,
        Permission::TimedOut,
    ];

    /// Number of flags in the domain.
    pub const COUNT: usize = Permission::ALL.len();

    /// Bit position of this flag (bit 0 is least significant).
    pub fn bit(self) -> u64 {
        self as u64
    }

    /// Wire name of this flag.
    pub fn name(self) -> &'static str {
        match self {
            Permission::CreateInstantInvite => "CREATE_INSTANT_INVITE",
            Permission::KickMembers => "KICK_MEMBERS",
            Permission::BanMembers => "BAN_MEMBERS",
            Permission::Administrator => "ADMINISTRATOR",
            Permission::ManageChannels => "MANAGE_CHANNELS",
            Permission::ManageGuild => "MANAGE_GUILD",
            Permission::AddReactions => "ADD_REACTIONS",
            Permission::ViewAuditLog => "VIEW_AUDIT_LOG",
            Permission::PrioritySpeaker => "PRIORITY_SPEAKER",
            Permission::Stream => "STREAM",
            Permission::ViewChannel => "VIEW_CHANNEL",
            Permission::SendMessages => "SEND_MESSAGES",
            Permission::SendTtsMessages => "SEND_TTS_MESSAGES",
            Permission::ManageMessages => "MANAGE_MESSAGES",
            Permission::EmbedLinks => "EMBED_LINKS",
            Permission::AttachFiles => "ATTACH_FILES",
            Permission::ReadMessageHistory => "READ_MESSAGE_HISTORY",
            Permission::MentionEveryone => "MENTION_EVERYONE",
            Permission::UseExternalEmojis => "USE_EXTERNAL_EMOJIS",
            Permission::ViewGuildInsights => "VIEW_GUILD_INSIGHTS",
            Permission::Connect => "CONNECT",
            Permission::Speak => "SPEAK",
            Permission::MuteMembers => "MUTE_MEMBERS",
            Permission::DeafenMembers => "DEAFEN_MEMBERS",
            Permission::MoveMembers => "MOVE_MEMBERS",
            Permission::UseVad => "USE_VAD",
            Permission::ChangeNickname => "CHANGE_NICKNAME",
            Permission::ManageNicknames => "MANAGE_NICKNAMES",
            Permission::ManageRoles => "MANAGE_ROLES",
            Permission::ManageWebhooks => "MANAGE_WEBHOOKS",
            Permission::ManageEmojisAndStickers => "MANAGE_EMOJIS_AND_STICKERS",
            Permission::UseApplicationCommands => "USE_APPLICATION_COMMANDS",
            Permission::RequestToSpeak => "REQUEST_TO_SPEAK",
            Permission::ManageEvents => "MANAGE_EVENTS",
            Permission::ManageThreads => "MANAGE_THREADS",
            Permission::CreatePublicThreads => "CREATE_PUBLIC_THREADS",
            Permission::CreatePrivateThreads => "CREATE_PRIVATE_THREADS",
            Permission::UseExternalStickers => "USE_EXTERNAL_STICKERS",
            Permission::SendMessagesInThreads => "SEND_MESSAGES_IN_THREADS",
            Permission::UseEmbeddedActivities => "USE_EMBEDDED_ACTIVITIES",
            Permission::TimedOut => "TIMED_OUT",
        }
    }

    /// Look up a flag by bit position.
    pub fn from_bit(bit: u64) -> Option<Permission> {
        Permission::ALL.iter().copied().find(|flag| flag.bit() == bit)
    }

    /// Look up a flag by wire name.
    pub fn from_name(name: &str) -> Option<Permission> {
        Permission::ALL.iter().copied().find(|flag| flag.name() == name)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_positions_are_stable() {
        assert_eq!(Permission::CreateInstantInvite.bit(), 0);
        assert_eq!(Permission::Administrator.bit(), 3);
        assert_eq!(Permission::ViewChannel.bit(), 10);
        assert_eq!(Permission::TimedOut.bit(), 40);
    }

    #[test]
    fn test_domain_size() {
        assert_eq!(Permission::COUNT, 41);
    }

    #[test]
    fn test_table_matches_discriminants() {
        for (i, flag) in Permission::ALL.iter().enumerate() {
            assert_eq!(flag.bit(), i as u64);
        }
    }

    #[test]
    fn test_from_bit_round_trip() {
        for flag in Permission::ALL {
            assert_eq!(Permission::from_bit(flag.bit()), Some(flag));
        }
        assert_eq!(Permission::from_bit(41), None);
    }

    #[test]
    fn test_from_name_round_trip() {
        for flag in Permission::ALL {
            assert_eq!(Permission::from_name(flag.name()), Some(flag));
        }
        assert_eq!(Permission::from_name("NO_SUCH_FLAG"), None);
    }
}
