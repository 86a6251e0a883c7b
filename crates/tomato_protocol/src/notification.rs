//! Notification effect codes.

/// Kind of effect carried by a server notification.
///
/// The codes are fixed by the server and are not contiguous (9 is unused).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NotificationEffectType {
    /// A stat went up.
    StatIncrease = 0,
    /// Plain server message.
    ServerMessage = 1,
    /// Error message.
    ErrorMessage = 2,
    /// Message that stays on screen.
    KeepMessage = 3,
    /// UI notification.
    Ui = 4,
    /// Queue position update.
    Queue = 5,
    /// Text floating over an object.
    ObjectText = 6,
    /// A player died.
    Death = 7,
    /// A dungeon portal opened.
    DungeonOpened = 8,
    /// A dungeon call went out.
    DungeonCall = 10,
}

impl NotificationEffectType {
    /// Every known effect, in code order.
    pub const ALL: [Self; 10] = [
        Self::StatIncrease,
        Self::ServerMessage,
        Self::ErrorMessage,
        Self::KeepMessage,
        Self::Ui,
        Self::Queue,
        Self::ObjectText,
        Self::Death,
        Self::DungeonOpened,
        Self::DungeonCall,
    ];

    /// Returns the wire code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up an effect by wire code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}
