//! Navigation chrome around the page content

pub const BRAND_MARK: &str = "AR";
pub const BRAND_NAME: &str = "ANPR READER";
pub const TAGLINE: &str =
    "Building amazing experiences with modern technology and thoughtful design.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { label: "Home", path: "/" },
    NavLink { label: "About", path: "/about" },
    NavLink { label: "Services", path: "/services" },
    NavLink { label: "Contact", path: "/contact" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Mail,
    Phone,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactLine {
    pub kind: ContactKind,
    pub text: &'static str,
}

pub const CONTACT_LINES: [ContactLine; 3] = [
    ContactLine { kind: ContactKind::Mail, text: "no-reply@classroom.google.com" },
    ContactLine { kind: ContactKind::Phone, text: "+(62) 123-4567" },
    ContactLine { kind: ContactKind::Address, text: "123 Main St, City, State 12345" },
];

pub fn copyright_line(year: i32) -> String {
    format!("© {} {}. All rights reserved.", year, BRAND_NAME)
}

/// Current calendar year in local time (UTC if the offset is unknown)
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_local()
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc())
        .year()
}

/// Layout state; the only thing that changes is the collapsed menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutShell {
    mobile_menu_open: bool,
}

impl LayoutShell {
    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    /// Following a menu link closes the menu
    pub fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }
}
