use abies_macro_tools::Fields;

#[test]
fn test_common_read_field() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        field_a: String,
        field_b: i32,
    }

    let meta = Meta {
        field_a: String::new(),
        field_b: 3,
    };

    let _field_a: &String = meta.field_a();
    let _field_b: i32 = meta.field_b();
}

#[test]
fn test_common_write_field() {
    #[derive(Fields)]
    #[w]
    struct Meta {
        field_a: String,
        field_b: i32,
    }

    let mut meta = Meta {
        field_a: String::new(),
        field_b: 3,
    };

    let _field_a_mut: &mut String = meta.field_a_mut();
    let _field_b_mut: &mut i32 = meta.field_b_mut();
}

#[test]
fn test_custom_write_field() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        #[w]
        field_a: String,
        field_b: i32,
    }

    let mut meta = Meta {
        field_a: String::new(),
        field_b: 3,
    };

    let field_b = meta.field_b();
    let field_a_mut: &mut String = meta.field_a_mut();
    *field_a_mut = field_b.to_string();
}

#[test]
fn test_custom_write_field_reducer() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        #[w(reducer)]
        field_a: i32,
        field_b: i32,
    }

    let mut meta = Meta {
        field_a: 1,
        field_b: 3,
    };

    let field_b = meta.field_b();

    meta.set_field_a(|field_a| field_a + field_b);
}

#[test]
fn test_custom_write_field_set() {
    #[derive(Fields)]
    #[r]
    struct Meta {
        #[w(set)]
        field_a: String,
        field_b: i32,
    }

    let mut meta = Meta {
        field_a: String::new(),
        field_b: 3,
    };

    let field_b = meta.field_b();

    meta.set_field_a(meta.field_a().clone() + &field_b.to_string());
}

#[test]
fn test_builder_defaults() {
    use abies_macro_tools::Builder;

    #[derive(Builder, Fields)]
    #[r]
    struct Config {
        #[default = 0.005]
        slop: f32,
        #[builder(skip)]
        generation: u32,
    }

    let config: Config = ConfigBuilder::new().into();
    assert_eq!(config.slop(), 0.005);
    assert_eq!(config.generation(), 0);

    let config: Config = ConfigBuilder::new().slop(0.01f32).into();
    assert_eq!(config.slop(), 0.01);
}
