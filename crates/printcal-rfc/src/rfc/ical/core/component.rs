//! iCalendar component tree (RFC 5545 §3.4-3.6).

use super::{Property, names};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Unknown/X-component.
    Unknown,
}

impl ComponentKind {
    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }
}

/// An iCalendar component with its properties and nested sub-components.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    /// Component name as written (uppercased), kept for X-components.
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components in order of appearance.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an empty component from its BEGIN name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: ComponentKind::parse(&name),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns all properties with the given name.
    pub fn get_properties<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(move |p| p.name == name_upper)
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.as_text()
    }

    /// Returns the UID property value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.text(names::UID)
    }

    /// Returns the SUMMARY property value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.text(names::SUMMARY)
    }

    /// Returns the LOCATION property value if present.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.text(names::LOCATION)
    }

    /// Returns direct VEVENT children in document order.
    pub fn events(&self) -> impl Iterator<Item = &Component> {
        self.children
            .iter()
            .filter(|c| c.kind == ComponentKind::Event)
    }
}

/// A parsed VCALENDAR object.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Returns the VERSION value.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.text("VERSION")
    }

    /// Returns all VEVENT components in document order.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.events().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_kind_parse() {
        assert_eq!(ComponentKind::parse("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::parse("vtodo"), ComponentKind::Todo);
        assert_eq!(ComponentKind::parse("X-CUSTOM"), ComponentKind::Unknown);
    }

    #[test]
    fn component_text_accessors() {
        let mut event = Component::named("vevent");
        event.add_property(Property::text("UID", "trip-1"));
        event.add_property(Property::text("SUMMARY", "Museum trip"));

        assert_eq!(event.name, "VEVENT");
        assert_eq!(event.uid(), Some("trip-1"));
        assert_eq!(event.summary(), Some("Museum trip"));
        assert_eq!(event.location(), None);
    }

    #[test]
    fn icalendar_events_skip_other_components() {
        let mut root = Component::named("VCALENDAR");
        root.add_property(Property::text("VERSION", "2.0"));
        root.add_child(Component::named("VTIMEZONE"));
        root.add_child(Component::named("VEVENT"));
        root.add_child(Component::named("VTODO"));
        root.add_child(Component::named("VEVENT"));

        let ical = ICalendar { root };
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.events().len(), 2);
    }

    #[test]
    fn get_properties_returns_all_matches() {
        let mut event = Component::named("VEVENT");
        event.add_property(Property::text("EXDATE", "a"));
        event.add_property(Property::text("SUMMARY", "b"));
        event.add_property(Property::text("exdate", "c"));
        assert_eq!(event.get_properties("EXDATE").count(), 2);
    }
}
