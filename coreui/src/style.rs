use bitflags::bitflags;

bitflags! {
    /// Decorations of a native window.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct NativeWindowStyles: u32 {
        const BORDER     = 0b001;
        const CAPTION    = 0b010;
        const RESIZEABLE = 0b100;
    }
}

impl NativeWindowStyles {
    /// Drop the styles which can't exist without a border.
    pub fn normalized(self) -> Self {
        if self.contains(Self::BORDER) {
            self
        } else {
            Self::empty()
        }
    }
}

impl Default for NativeWindowStyles {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_border_strips_everything() {
        let styles = NativeWindowStyles::CAPTION | NativeWindowStyles::RESIZEABLE;
        assert_eq!(styles.normalized(), NativeWindowStyles::empty());
    }

    #[test]
    fn border_keeps_styles() {
        let styles = NativeWindowStyles::BORDER | NativeWindowStyles::RESIZEABLE;
        assert_eq!(styles.normalized(), styles);
    }
}
