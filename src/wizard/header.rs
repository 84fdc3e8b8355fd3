#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderType {
    #[default]
    Null,
    Primary,
    Secondary,
    Tertiary,
}

impl HeaderType {
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderType::Null => "null",
            HeaderType::Primary => "primary",
            HeaderType::Secondary => "secondary",
            HeaderType::Tertiary => "tertiary",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogoSize {
    #[default]
    Regular,
    Small,
}

/// What the header's back arrow does. `Step` hands the press to the active
/// step, which resolves its previous step or history-back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackHandler {
    #[default]
    Hidden,
    Step,
}

/// Chrome shared by all steps. Steps overwrite the parts they care about on
/// entry; nothing is restored when a step is left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderState {
    pub title: String,
    pub subtitle: String,
    pub header_type: HeaderType,
    pub logo_size: LogoSize,
    pub back: BackHandler,
}

impl HeaderState {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = subtitle.into();
    }

    pub fn set_type(&mut self, header_type: HeaderType) {
        self.header_type = header_type;
    }

    pub fn set_logo_size(&mut self, logo_size: LogoSize) {
        self.logo_size = logo_size;
    }

    pub fn set_back(&mut self, back: BackHandler) {
        self.back = back;
    }

    pub fn back_visible(&self) -> bool {
        self.back == BackHandler::Step
    }
}
