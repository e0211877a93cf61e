use crate::environment::Environment;
use crate::evaluator::{self, eval, evaluate_each};
use crate::list::List;
use crate::types::{Int, NativeProcedure, Value};
use std::rc::Rc;

fn grab_ints(args: &List, env: &Rc<Environment>) -> evaluator::Result<Vec<Int>> {
    args.iter()
        .map(|arg| -> evaluator::Result<Int> { Ok(eval(arg, env)?.as_int()?) })
        .collect()
}

// A missing operand reads as nil.
fn single(args: &List, env: &Rc<Environment>) -> evaluator::Result {
    eval(args.head().unwrap_or(&Value::Nil), env)
}

/// Splits off the seed of `-`, `/` and the comparisons. With no operands at all the seed is
/// nil, which is not an integer.
fn seed_and_rest(args: &List, env: &Rc<Environment>) -> evaluator::Result<(Int, Vec<Int>)> {
    let seed = single(args, env)?.as_int()?;
    let rest = match args.tail() {
        Some(rest) => grab_ints(rest, env)?,
        None => Vec::new(),
    };
    Ok((seed, rest))
}

static SUM: NativeProcedure = NativeProcedure {
    name: "+",
    fn_ptr: sum_,
};

fn sum_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let value = grab_ints(args, env)?
        .iter()
        .fold(0 as Int, |acc, &x| acc.wrapping_add(x));
    Ok(Value::Integer(value))
}

static MUL: NativeProcedure = NativeProcedure {
    name: "*",
    fn_ptr: mul_,
};

fn mul_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let value = grab_ints(args, env)?
        .iter()
        .fold(1 as Int, |acc, &x| acc.wrapping_mul(x));
    Ok(Value::Integer(value))
}

static SUB: NativeProcedure = NativeProcedure {
    name: "-",
    fn_ptr: sub_,
};

fn sub_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let (first, rest) = seed_and_rest(args, env)?;
    Ok(Value::Integer(
        rest.iter().fold(first, |acc, &x| acc.wrapping_sub(x)),
    ))
}

static DIV: NativeProcedure = NativeProcedure {
    name: "/",
    fn_ptr: div_,
};

fn div_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let (first, rest) = seed_and_rest(args, env)?;
    rest.iter()
        .try_fold(first, |acc, &x| match x {
            0 => Err(evaluator::Error::DivideByZero),
            _ => Ok(acc.wrapping_div(x)),
        })
        .map(Value::Integer)
}

/// Holds when `holds(first, operand)` is true for every later operand. The first operand is
/// never replaced, so `(< 1 3 2)` holds. Evaluation stops at the first operand that fails.
fn comparison_(
    env: &Rc<Environment>,
    args: &List,
    holds: fn(&Int, &Int) -> bool,
) -> evaluator::Result {
    let first = single(args, env)?.as_int()?;
    for operand in args.iter().skip(1) {
        if !holds(&first, &eval(operand, env)?.as_int()?) {
            return Ok(Value::boolean(false));
        }
    }
    Ok(Value::boolean(true))
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident, $HOLDS:ident) => {
        paste::item! {
            static $NAME: NativeProcedure = NativeProcedure {
                name: stringify!($SYMBOL),
                fn_ptr: [<$NAME:lower _>],
            };

            fn [<$NAME:lower _>](env: &Rc<Environment>, args: &List) -> evaluator::Result {
                comparison_(env, args, Int::$HOLDS)
            }
        }
    };
}

comparison_primitive!(<, LT, le);
comparison_primitive!(>, GT, ge);

static CAR: NativeProcedure = NativeProcedure {
    name: "car",
    fn_ptr: car_,
};

fn car_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let list = single(args, env)?.into_list()?;
    Ok(list.head().cloned().unwrap_or(Value::Nil))
}

static CDR: NativeProcedure = NativeProcedure {
    name: "cdr",
    fn_ptr: cdr_,
};

fn cdr_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let list = single(args, env)?.into_list()?;
    Ok(Value::List(list.rest()))
}

static LIST: NativeProcedure = NativeProcedure {
    name: "list",
    fn_ptr: list_,
};

fn list_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    evaluate_each(args, env).map(Value::List)
}

static LENGTH: NativeProcedure = NativeProcedure {
    name: "length",
    fn_ptr: length_,
};

fn length_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let list = single(args, env)?.into_list()?;
    Ok(Value::Integer(list.len() as Int))
}

static APPEND: NativeProcedure = NativeProcedure {
    name: "append",
    fn_ptr: append_,
};

fn append_(env: &Rc<Environment>, args: &List) -> evaluator::Result {
    let mut output = List::new();
    for arg in args {
        output.append(eval(arg, env)?.into_list()?)?;
    }
    Ok(Value::List(output))
}

pub(crate) static CORE: &[&NativeProcedure] = &[
    // Arithmetic
    &SUM,
    &SUB,
    &MUL,
    &DIV,
    // Comparisons
    &LT,
    &GT,
    // Working with lists
    &CAR,
    &CDR,
    &LIST,
    &LENGTH,
    &APPEND,
];

#[cfg(test)]
mod tests {
    use crate::environment::Environment;
    use crate::evaluator::Error;
    use crate::interpreter::{evaluate_program, Error as ProgramError};
    use crate::reader::read_str;
    use crate::types::Value;

    fn run(src: &str) -> Value {
        evaluate_program(src, &Environment::standard()).unwrap()
    }

    fn fails(src: &str) -> Error {
        match evaluate_program(src, &Environment::standard()) {
            Err(ProgramError::Eval(e)) => e,
            other => panic!("{}: unexpected {:?}", src, other),
        }
    }

    #[test]
    fn arithmetic_folds_left_to_right() {
        assert_eq!(run("(+ 1 2 3)"), Value::Integer(6));
        assert_eq!(run("(- 10 1 2)"), Value::Integer(7));
        assert_eq!(run("(* 2 3 4)"), Value::Integer(24));
        assert_eq!(run("(/ 12 2 3)"), Value::Integer(2));
        assert_eq!(run("(+)"), Value::Integer(0));
        assert_eq!(run("(*)"), Value::Integer(1));
        assert_eq!(run("(- 5)"), Value::Integer(5));
        assert_eq!(run("(+ (* 2 3) (- 0x10 1))"), Value::Integer(21));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(fails("(/ 1 0)"), Error::DivideByZero));
        assert!(matches!(fails("(/ 1 2 0)"), Error::DivideByZero));
    }

    #[test]
    fn arithmetic_needs_integers() {
        assert!(matches!(fails("(+ 1 (quote a))"), Error::TypeMismatch(_)));
        assert!(matches!(fails("(-)"), Error::TypeMismatch(_)));
        assert!(matches!(fails("(/)"), Error::TypeMismatch(_)));
        assert!(matches!(fails("(<)"), Error::TypeMismatch(_)));
    }

    #[test]
    fn comparisons_test_the_first_operand_against_each_other() {
        assert_eq!(run("(< 1 2 3)"), Value::boolean(true));
        assert_eq!(run("(< 1 1)"), Value::boolean(true));
        assert_eq!(run("(< 1 3 2)"), Value::boolean(true));
        assert_eq!(run("(< 2 1)"), Value::boolean(false));
        assert_eq!(run("(< 1 2 0)"), Value::boolean(false));
        assert_eq!(run("(> 3 2 1)"), Value::boolean(true));
        assert_eq!(run("(> 2 2)"), Value::boolean(true));
        assert_eq!(run("(> 3 1 2)"), Value::boolean(true));
        assert_eq!(run("(> 1 2)"), Value::boolean(false));
        assert_eq!(run("(< 5)"), Value::boolean(true));
    }

    #[test]
    fn comparisons_short_circuit() {
        assert_eq!(run("(< 2 1 unbound)"), Value::boolean(false));
        assert!(matches!(fails("(< 1 2 unbound)"), Error::UnboundSymbol(_)));
    }

    #[test]
    fn operand_counts_are_not_checked() {
        assert!(matches!(fails("(car)"), Error::TypeMismatch(_)));
        assert!(matches!(fails("(length)"), Error::TypeMismatch(_)));
        assert_eq!(run("(car (quote (1)) unbound)"), Value::Integer(1));
        assert_eq!(run("(append)"), Value::new_list());
    }

    #[test]
    fn car_and_cdr() {
        assert_eq!(run("(car (quote (1 2 3)))"), Value::Integer(1));
        assert_eq!(run("(cdr (quote (1 2 3)))"), read_str("(2 3)").unwrap());
        assert_eq!(run("(car ())"), Value::Nil);
        assert_eq!(run("(cdr (quote (1)))"), Value::new_list());
        assert!(matches!(fails("(car 1)"), Error::TypeMismatch(_)));
    }

    #[test]
    fn list_evaluates_each_element() {
        assert_eq!(run("(list 1 (+ 1 1) (quote x))"), read_str("(1 2 x)").unwrap());
        assert_eq!(run("(list)"), Value::new_list());
    }

    #[test]
    fn length_counts_elements() {
        assert_eq!(run("(length (quote (1 2 3)))"), Value::Integer(3));
        assert_eq!(run("(length ())"), Value::Integer(0));
    }

    #[test]
    fn append_splices_lists() {
        assert_eq!(
            run("(append (quote (1 2)) (list 3) () (quote (4)))"),
            read_str("(1 2 3 4)").unwrap()
        );
        assert_eq!(run("(append ())"), Value::new_list());
        assert!(matches!(fails("(append (quote (1)) 2)"), Error::TypeMismatch(_)));
    }

    #[test]
    fn append_leaves_its_inputs_alone() {
        assert_eq!(
            run("(define a (quote (1))) (append a a) a"),
            read_str("(1)").unwrap()
        );
    }
}
