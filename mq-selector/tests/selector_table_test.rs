// Copyright 2023 The RocketMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Selector truth table against a fixed message.

use std::collections::HashMap;

use mq_selector::PropertyValue;
use mq_selector::Selector;
use mq_selector::SelectorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    True,
    False,
    Error,
}

use Expect::Error;
use Expect::False;
use Expect::True;

const TIMESTAMP: i64 = 1_700_000_000_000;

fn properties() -> HashMap<&'static str, PropertyValue> {
    let mut props = HashMap::new();
    props.insert("color", PropertyValue::from("red"));
    props.insert("description", PropertyValue::from("Dark hot chocolate with nuts"));
    props.insert("size", PropertyValue::Int(1024));
    props.insert("msgnum", PropertyValue::Int(5));
    props.insert("msgnumStr", PropertyValue::from("5"));
    props.insert("price", PropertyValue::Float(1.50));
    props.insert("quantity", PropertyValue::Long(500));
    props.insert("minlong", PropertyValue::Long(i64::MIN));
    props.insert("maxlong", PropertyValue::Long(i64::MAX));

    props.insert("trueProp", PropertyValue::Boolean(true));
    props.insert("falseProp", PropertyValue::Boolean(false));
    props.insert("byteProp", PropertyValue::Byte(4));
    props.insert("shortProp", PropertyValue::Short(4));
    props.insert("intProp", PropertyValue::Int(4));
    props.insert("negIntProp", PropertyValue::Int(-4));
    props.insert("floatProp", PropertyValue::Float(4.0));
    props.insert("stringProp", PropertyValue::from("4"));

    props.insert("Event", PropertyValue::from("*Service Change*Restart*"));
    props.insert("Region", PropertyValue::from("*EA*SO*WE*BC*"));
    props.insert("Airspace", PropertyValue::from("*ASSS*ARCC*BVNF*"));

    props.insert("JMSXUserID", PropertyValue::from("testUser"));
    props
}

fn headers() -> HashMap<&'static str, PropertyValue> {
    let mut fields = HashMap::new();
    fields.insert("JMSDeliveryMode", PropertyValue::from("PERSISTENT"));
    fields.insert("JMSPriority", PropertyValue::Int(7));
    fields.insert("JMSTimestamp", PropertyValue::Long(TIMESTAMP));
    fields.insert("JMSCorrelationID", PropertyValue::from("123456789"));
    fields.insert("JMSType", PropertyValue::from("order"));
    fields.insert("JMSMessageID", PropertyValue::from(format!("messageid_{TIMESTAMP}")));
    fields
}

const TABLE: &[(&str, Expect)] = &[
    ("color = 'red'", True),
    ("color = 'blue'", False),
    ("color <> 'red'", False),
    ("color <> 'blue'", True),
    ("color in ('red', 'white', 'blue')", True),
    ("color in ('orange', 'white', 'blue')", False),
    ("color not in ('orange', 'white', 'blue')", True),
    ("description like '%hot%'", True),
    ("description not like '%hot%'", False),
    ("color like 'r_d'", True),
    ("color like 'r_d' or color like 'bl_e'", True),
    ("color like 'r_d' and (color like 'b%' or color like '%d')", True),
    ("quantity between 400 and 1000.0", True),
    ("price between 1.10 and 2", True),
    ("price not between 5 and 10e2", True),
    ("price not between 5 and 10e2 and price between 1 and 2", True),
    ("price not between 5 and 10e2 or price between 1 and 2", True),
    ("nullProp is null and price is not null", True),
    ("nullProp is null or  price is not null", True),
    ("price is not null", True),
    ("price > 0.75", True),
    ("price < 9.75", True),
    ("price >= 1.50", True),
    ("price <= 1.50", True),
    ("price > 9.75", False),
    ("price >= 9.75", False),
    ("msgnum > 1.75", True),
    ("size > msgnum", True),
    ("size > price", True),
    ("size > price + msgnum", True),
    ("size > price * msgnum", True),
    ("quantity * price > 3.00", True),
    ("JMSXUserID = 'testUser'", True),
    ("JMSMessageID like '%~_%' escape '~'", True),
    ("JMSTimestamp > 4", True),
    ("JMSCorrelationID like '1_34__%9'", True),
    ("JMSType <> 'quote'", True),
    ("JMSPriority > 5", True),
    ("JMSPriority < JMSTimestamp", True),
    ("byteProp = 4", True),
    ("byteProp <> 5.0", True),
    ("shortProp <> 5.0", True),
    ("intProp <> 5.0", True),
    ("byteProp = shortProp", True),
    ("byteProp = floatProp", True),
    ("floatProp = 4.0 ", True),
    ("floatProp * 2 > byteProp", True),
    ("stringProp = '4'", True),
    // number against string is a type mismatch, false for both = and <>
    ("stringProp =  4", False),
    ("stringProp <> '5'", True),
    ("stringProp <>  5", False),
    ("byteProp <> 4", False),
    ("byteProp = 5.0", False),
    ("shortProp = 5.0", False),
    ("intProp = 5.0", False),
    ("1 + 4 * 5 = 21", True),
    ("1+4*5=21", True),
    ("1 + -4 * 5 = -19", True),
    ("(1 + 4) * +5 = 25", True),
    ("(1 + 4) * -5 = -25", True),
    ("(1 + 4) * 5 = (3 + 2) * 5", True),
    ("1 + (4 * 5) = 21", True),
    ("1 +  4 * 5  = 21", True),
    ("(1 +  4) * 5 = 25", True),
    ("(1 +  4) - 5 = 0 ", True),
    ("2.0 * 4E2 + 5 = 805.0", True),
    ("2.0 * 4E2 + 5 = 805", True),
    ("2.0 = 2.0", True),
    ("1.0+2.0*3.0-4.0/4.0 = 6", True),
    ("price > 0.75 OR color <> 'blue'", True),
    ("(price > 0.75 OR color <> 'blue') AND color <> 'green'", True),
    ("     2 * quantity between msgnum AND msgnum * size", True),
    ("NOT (2 * quantity between msgnum AND msgnum * size)", False),
    ("-price < 0 AND +negIntProp < 0", True),
    ("negIntProp+4 = 0 AND intProp-1 = 3", True),
    ("- intProp + intProp = 0", True),
    ("intProp between -1 and 5", True),
    ("intProp between 1 and 5 AND intProp between -1 and 5", True),
    ("minlong=-9223372036854775808 AND maxlong=9223372036854775807", True),
    ("unknownProp NOT IN ('foo','jms','test')", False),
    ("nullProp NOT IN ('foo','jms','test')", False),
    ("unknownProp NOT LIKE '1_3'", False),
    ("nullProp    NOT LIKE '1_3'", False),
    ("0x1d = 29", True),
    ("0x1D = 29", True),
    ("035 = 29", True),
    ("29L = 29", True),
    ("29l = 29", True),
    ("18. = 1.8e1", True),
    ("18. = .18e2", True),
    ("18.0f = .18e2", True),
    ("18.0F = .18e2", True),
    ("18.0d = .18e2", True),
    ("18.0D = .18e2", True),
    (".7e4 = 7000.0", True),
    (" is null nullProp", True),
    ("NOT is null nullProp", False),
    (" is null unknownProp", True),
    (" is not null nullProp", False),
    ("NOT is not null nullProp", True),
    ("TRUE", True),
    ("NOT TRUE", False),
    ("(NOT (NOT (NOT (NOT TRUE))))", True),
    ("FALSE", False),
    ("NOT FALSE", True),
    ("trueProp", True),
    ("NOT trueProp", False),
    ("trueProp = TRUE", True),
    ("trueProp = FALSE", False),
    ("trueProp <> FALSE", True),
    ("falseProp", False),
    ("falseProp = TRUE", False),
    ("falseProp = FALSE", True),
    ("falseProp <> TRUE", True),
    ("NOT falseProp", True),
    ("description LIKE '%nuts%' AND color in ('black', 'white') OR color = 'blue'", False),
    ("description LIKE '%nuts%' OR color in ('black', 'white') OR color = 'blue'", True),
    (
        "Event LIKE '%*Service Change*%' OR Event LIKE '%*Restart*%' AND Region LIKE '%*EA*%' AND Airspace LIKE \
         '%*ARCC*%'",
        True,
    ),
    ("color = 'red' OR color <> 'blue' AND color <> 'green'", True),
    ("color = 'white' OR color <> 'blue' AND color <> 'green'", True),
    ("color = 'white' OR color <> 'red' AND color <> 'green'", False),
    ("color = 'red' OR color <> 'blue' AND color <> 'red'", True),
    ("(color = 'red' OR color <> 'blue') AND color <> 'red'", False),
    ("(color = 'red' OR color <> 'blue') AND NOT color <> 'red'", True),
    ("true OR true OR true OR true", True),
    ("(true OR true) OR (true OR true)", True),
    ("true OR false OR true OR false", True),
    ("false OR false OR false OR true", True),
    ("true OR false OR false OR false", True),
    ("false OR false OR false OR false", False),
    ("true AND true AND true AND true", True),
    ("(true AND false) AND (true AND false)", False),
    ("false AND false AND false AND true", False),
    ("true AND false AND false AND false", False),
    ("false AND true AND true AND true", False),
    ("true AND true AND true AND false", False),
    ("true AND false OR true AND true", True),
    ("true OR false AND true OR false", True),
    ("(true OR false) AND (true OR false)", True),
    ("NOT ((true OR false) AND (true OR false))", False),
    ("color in ('red', 'white', 'blue'(", Error),
    ("size not between 'red'  and 'green'", Error),
    ("+ + + +", Error),
    ("1 2 3 4", Error),
    ("= = = =", Error),
    ("((1 + 2) * 4 = 3", Error),
    ("red red red", Error),
    ("4 >> 1", Error),
    ("color = 'red", Error),
    ("color == 'red'", Error),
    ("intProp BETWEEN 'foo' and 'test'", Error),
    ("intProp > 'foo'", Error),
    ("color    > 'foo'", Error),
    ("unknownProp > 'foo'", Error),
    ("unknownProp < 'foo'", Error),
    ("unknownProp =< 'foo'", Error),
    ("unknownProp >= 'foo'", Error),
    ("intProp >= 'foo'", Error),
    ("intProp < 'foo'", Error),
    ("intProp <= 'foo'", Error),
    ("intProp between 'foo' and 'bar'", Error),
    ("color    between 1 and 7", Error),
    ("'color'    between 1 and 7", Error),
    ("7 in ('red', 'blue')", Error),
    ("intProp in ('red', 'blue')", Error),
    ("7 not in ('red', 'blue')", Error),
    ("intProp not in ('red', 'blue')", Error),
    ("NULL = 0", Error),
    ("=color 'red'", Error),
    ("size like '7'", Error),
    ("size not like '7'", Error),
    ("4 = 'red'", False),
    ("4 <> 'red'", False),
    ("'red' <> 4", False),
    ("'red' =  4", False),
    ("intProp = 'red'", False),
    ("intProp <> 'red'", False),
    ("'red' = intProp", False),
    ("'red' <> intProp", False),
    ("msgnumStr = 5", False),
    ("msgnum    = '5'", False),
    ("300 + 150 / 0 = 300", Error),
];

/// Compiles and evaluates, handing each context over only when the selector
/// references it.
fn run(text: &str, config: SelectorConfig) -> Expect {
    let props = properties();
    let fields = headers();
    let selector = match Selector::compile(text, config) {
        Ok(selector) => selector,
        Err(_) => return Error,
    };
    let props = selector.uses_properties().then_some(&props as &dyn mq_selector::EvaluationContext);
    let fields = selector.uses_fields().then_some(&fields as &dyn mq_selector::EvaluationContext);
    match selector.evaluate(props, fields) {
        Ok(true) => True,
        Ok(false) => False,
        Err(_) => Error,
    }
}

fn check_table(config: SelectorConfig) {
    let failures: Vec<String> = TABLE
        .iter()
        .filter_map(|(text, expected)| {
            let actual = run(text, config);
            (actual != *expected).then(|| format!("{text}: expected {expected:?}, got {actual:?}"))
        })
        .collect();
    assert!(failures.is_empty(), "{} failures:\n{}", failures.len(), failures.join("\n"));
}

#[test]
fn truth_table_with_short_circuit() {
    check_table(SelectorConfig::default());
}

#[test]
fn truth_table_without_short_circuit() {
    check_table(SelectorConfig::default().with_short_circuit(false));
}

#[test]
fn type_conversion_changes_mismatched_comparisons() {
    let config = SelectorConfig::default().with_convert_types(true);
    assert_eq!(run("stringProp = 4", config), True);
    assert_eq!(run("msgnumStr = 5", config), True);
    assert_eq!(run("msgnum    = '5'", config), True);
    assert_eq!(run("'2.5' * 2 = 5", config), True);
    assert_eq!(run("4 = 'red'", config), Error);
    assert_eq!(run("intProp > 'foo'", config), Error);
}
