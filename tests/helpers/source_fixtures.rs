//! Common source code fixtures for tests.

/// The four-enum Java fixture (Season, Colors, Direction, DataType)
pub const ENUM_FIXTURE: &str = include_str!("../fixtures/Enum.java");

/// An annotated enum with comments around and inside every construct
pub const COMMENTED: &str = include_str!("../fixtures/Commented.java");

pub const SEASON: &str = "enum Season { WINTER, SPRING, SUMMER, AUTUMN }";

pub const COLORS: &str = r#"
enum Colors {
    RED, YELLOW, GREEN;

    enum InnerEnum {

    }
}
"#;

pub const DIRECTION: &str = r#"
enum Direction {
    UP {
        public Direction opposite() { return DOWN; }
    },
    DOWN {
        public Direction opposite() { return UP; }
    };

    public abstract Direction opposite();
}
"#;

pub const DATA_TYPE: &str = r#"
enum DataType {
    INT(true) {
        public Object parse(String string) { return Integer.valueOf(string); }
    },
    INTEGER(false) {
        public Object parse(String string) { return Integer.valueOf(string); }
    },
    STRING(false) {
        public Object parse(String string) { return string; }
    };

    boolean primitive;
    DataType(boolean primitive) { this.primitive = primitive; }

    public boolean isPrimitive() { return primitive; }
    public abstract Object parse(String string);
}
"#;

/// Constant bodies that override an inherited, non-abstract method
pub const INHERITED_OVERRIDE: &str = r#"
enum Planet {
    EARTH {
        @Override
        public String toString() { return "Earth"; }
    },
    MARS;
}
"#;

/// An enum nested in a class, next to a broken one
pub const MIXED_FILE: &str = r#"
package demo.enums;

import java.util.List;

public class Holder {
    private enum Mode { ON, OFF }
}

enum Broken {
    A, B
"#;
