use pretty_assertions::assert_eq;
use recall_config::ConfigurationDatabase;
use recall_object::{Object, StructuredData};
use rstest::rstest;

use super::*;

#[derive(Default)]
struct Heater {
	name: String,
	power: u32,
}

recall_object::impl_object!(Heater {
	fn initialise(&mut self, data: &dyn StructuredData) -> bool {
		match data.read_as::<u32>("Power") {
			Some(power) => {
				self.power = power;
				true
			}
			None => false,
		}
	}
});

#[derive(Default)]
struct Fan {
	name: String,
}

recall_object::impl_object!(Fan);

struct Unbuildable {
	name: String,
}

recall_object::impl_object!(Unbuildable);

fn database() -> ClassRegistryDatabase {
	let database = ClassRegistryDatabase::with_settings(RegistrySettings { dynamic_loading: false });
	database
		.add(ClassRegistryItem::new::<Heater>("1.0").with_builder(|| Box::new(Heater::default())))
		.expect("heater registers");
	database
		.add(ClassRegistryItem::new::<Fan>("1.0").with_builder(|| Box::new(Fan::default())))
		.expect("fan registers");
	database.add(ClassRegistryItem::new::<Unbuildable>("1.0")).expect("unbuildable registers");
	database
}

#[test]
fn classes_are_found_by_name_type_and_descriptor() {
	let database = database();
	assert_eq!(database.len(), 3);
	assert_eq!(database.class_names(), ["Heater", "Fan", "Unbuildable"]);

	let heater = database.find("Heater").expect("registered by class name");
	let by_type_name = database.find(heater.type_name()).expect("registered by type name");
	assert!(Arc::ptr_eq(&heater, &by_type_name));
	assert!(Arc::ptr_eq(&heater, &database.find_type::<Heater>().expect("registered by type")));
	assert!(Arc::ptr_eq(&heater, &database.find_by_descriptor(heater.descriptor()).expect("registered by descriptor")));
	assert!(database.find("Cooler").is_none());
	assert!(database.find_type::<String>().is_none());
}

#[test]
fn duplicate_classes_are_rejected() {
	let database = database();
	let error = database.add(ClassRegistryItem::new::<Fan>("2.0")).unwrap_err();
	assert!(matches!(error, RegistryError::DuplicateClass { class_name: "Fan", .. }));
	assert_eq!(database.len(), 3);
}

#[rstest]
#[case::close("Heeter", "unknown class: Heeter (did you mean 'Heater'?)")]
#[case::case_only("fan", "unknown class: fan (did you mean 'Fan'?)")]
#[case::far("Refrigerator", "unknown class: Refrigerator")]
fn unknown_class_suggests_a_neighbour(#[case] name: &str, #[case] message: &str) {
	let error = database().resolve(name).unwrap_err();
	assert_eq!(error.to_string(), message);
}

#[test]
fn library_names_are_not_loaded_when_disabled() {
	let database = database();
	assert!(database.find("devices::Heater2").is_none());
}

#[test]
fn missing_library_leaves_the_database_unchanged() {
	let database = ClassRegistryDatabase::with_settings(RegistrySettings { dynamic_loading: true });
	assert!(database.find("recall_library_that_does_not_exist::Pump").is_none());
	assert!(database.is_empty());
}

#[test]
fn objects_are_built_by_class_name() {
	let database = database();
	let fan = database.build_object("Fan", "ceiling").expect("fan is buildable");
	assert_eq!(fan.name(), Some("ceiling"));
	assert!(fan.downcast_ref::<Fan>().is_some());
	assert!(matches!(database.build_object("Unbuildable", "x"), Err(RegistryError::NoBuilder("Unbuildable"))));
	assert!(matches!(database.build_object("Nothing", "x"), Err(RegistryError::UnknownClass { .. })));
}

#[test]
fn container_is_built_from_plus_nodes() {
	let database = database();
	let config = ConfigurationDatabase::from_toml_str(
		r#"
		Label = "hall"

		["+Radiator"]
		Class = "Heater"
		Power = 1500

		["+Vent"]
		Class = "Fan"

		[Settings]
		Class = "Heater"
		"#,
	)
	.expect("valid configuration");

	let container = database.initialise_container(&config).expect("objects build");
	assert_eq!(container.len(), 2);
	let radiator = container.find("Radiator");
	assert_eq!(radiator.downcast_ref::<Heater>().map(|heater| heater.power), Some(1500));
	assert!(container.find("Vent").downcast_ref::<Fan>().is_some());
	assert!(!container.find("Settings").is_valid());
	assert_eq!(config.node_name(), config.root().name());
}

#[test]
fn container_errors_name_the_object() {
	let database = database();

	let missing_class = ConfigurationDatabase::from_toml_str("[\"+Radiator\"]\nPower = 10\n").expect("valid configuration");
	assert!(matches!(database.initialise_container(&missing_class), Err(RegistryError::MissingClass(name)) if name == "Radiator"));

	let rejected = ConfigurationDatabase::from_toml_str("[\"+Radiator\"]\nClass = \"Heater\"\n").expect("valid configuration");
	assert!(matches!(
		database.initialise_container(&rejected),
		Err(RegistryError::Initialisation { class_name: "Heater", .. })
	));
	assert_eq!(rejected.node_name(), rejected.root().name());

	let unknown = ConfigurationDatabase::from_toml_str("[\"+Radiator\"]\nClass = \"Heeter\"\n").expect("valid configuration");
	assert!(matches!(
		database.initialise_container(&unknown),
		Err(RegistryError::UnknownClass { suggestion: Some(suggestion), .. }) if suggestion == "Heater"
	));
}

#[test]
fn absorbing_twice_adds_nothing() {
	let database = ClassRegistryDatabase::new();
	database.absorb_inventory();
	let len = database.len();
	assert_eq!(database.absorb_inventory(), 0);
	assert_eq!(database.len(), len);
}
